//! Package installation into a provisioned environment
//!
//! Installs the dependency set in order through the environment's own
//! interpreter. Each failure is fatal: no partial-environment launch.
//! Re-installing an already-satisfied package is pip's no-op, which is what
//! makes repeated runs cheap.

use crate::env::VenvContext;
use crate::error::{GoliveError, GoliveResult};
use crate::process::{args, ToolRunner};

/// Install `packages` into `venv`, in order, aborting on the first failure.
///
/// Reports each installed package through `progress` before invoking pip, so
/// a failing run shows which package it died on.
pub fn install_packages<R, F>(
    venv: &VenvContext,
    packages: &[String],
    runner: &R,
    mut progress: F,
) -> GoliveResult<()>
where
    R: ToolRunner + ?Sized,
    F: FnMut(&str),
{
    let python = venv.python();

    for package in packages {
        progress(package);

        let pip_args = args(["-m", "pip", "install", package.as_str()]);
        let code = runner
            .status(&python, &pip_args, None)
            .map_err(|e| GoliveError::Provisioning {
                message: format!("cannot run pip in '{}': {e}", venv.root().display()),
            })?;

        if code != Some(0) {
            return Err(GoliveError::DependencyInstall {
                package: package.clone(),
                code,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::MockRunner;
    use std::ffi::OsString;
    use std::path::PathBuf;

    fn venv() -> VenvContext {
        VenvContext::new(PathBuf::from("/live/.venv"))
    }

    fn packages(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn installs_packages_in_order_via_venv_python() {
        let runner = MockRunner::new();
        let mut seen = Vec::new();

        install_packages(&venv(), &packages(&["gtts", "pydub", "pandas"]), &runner, |p| {
            seen.push(p.to_string())
        })
        .unwrap();

        assert_eq!(seen, vec!["gtts", "pydub", "pandas"]);

        let calls = runner.recorded_calls();
        assert_eq!(calls.len(), 3);
        for (call, package) in calls.iter().zip(["gtts", "pydub", "pandas"]) {
            assert_eq!(call.program, venv().python());
            assert_eq!(
                call.args,
                vec![
                    OsString::from("-m"),
                    OsString::from("pip"),
                    OsString::from("install"),
                    OsString::from(package),
                ]
            );
        }
    }

    #[test]
    fn first_failure_aborts_remaining_installs() {
        let runner = MockRunner::new();
        runner.push_exit(0);
        runner.push_exit(1);

        let err =
            install_packages(&venv(), &packages(&["gtts", "pydub", "pandas"]), &runner, |_| {})
                .unwrap_err();

        match err {
            GoliveError::DependencyInstall { package, code } => {
                assert_eq!(package, "pydub");
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
        // pandas was never attempted
        assert_eq!(runner.recorded_calls().len(), 2);
    }

    #[test]
    fn empty_dependency_set_is_a_no_op() {
        let runner = MockRunner::new();

        install_packages(&venv(), &[], &runner, |_| {}).unwrap();

        assert!(runner.recorded_calls().is_empty());
    }
}

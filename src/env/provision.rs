//! Virtualenv provisioning
//!
//! Creation is explicitly idempotent: an existing `pyvenv.cfg` under the env
//! dir means "reuse", and `python -m venv` is not re-invoked. An existing
//! environment is never recreated or modified here.

use std::path::Path;

use crate::config::EnvConfig;
use crate::env::VenvContext;
use crate::error::{GoliveError, GoliveResult};
use crate::fs::FileSystem;
use crate::process::{args, ToolRunner};

/// Outcome of provisioning the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// `python -m venv` ran and created a fresh environment
    Created,
    /// An environment already existed at the configured path
    Reused,
}

/// Ensure a virtualenv exists at `<live_dir>/<env.dir>`.
pub fn provision_venv<FS, R>(
    live_dir: &Path,
    cfg: &EnvConfig,
    fs: &FS,
    runner: &R,
) -> GoliveResult<(VenvContext, ProvisionOutcome)>
where
    FS: FileSystem + ?Sized,
    R: ToolRunner + ?Sized,
{
    let venv = VenvContext::new(live_dir.join(&cfg.dir));

    if fs.exists(&venv.marker()) {
        return Ok((venv, ProvisionOutcome::Reused));
    }

    let venv_args = args([
        std::ffi::OsString::from("-m"),
        std::ffi::OsString::from("venv"),
        venv.root().as_os_str().to_os_string(),
    ]);

    let code = runner
        .status(Path::new(&cfg.python), &venv_args, None)
        .map_err(|e| GoliveError::Provisioning {
            message: format!("cannot run '{}': {e}", cfg.python),
        })?;

    if code != Some(0) {
        return Err(GoliveError::Provisioning {
            message: format!(
                "'{} -m venv {}' exited with code {code:?}",
                cfg.python,
                venv.root().display()
            ),
        });
    }

    Ok((venv, ProvisionOutcome::Created))
}

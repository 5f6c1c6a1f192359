//! Doctor checks for the external tools golive shells out to
//!
//! golive depends on the documented command contracts of the configured
//! Python interpreter and its `venv`/`pip` modules; doctor probes those
//! contracts without touching the live directory.

use std::path::Path;

use crate::config::Config;
use crate::process::{args, ToolRunner};

/// Status of a single tool check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
}

/// One probed tool contract
#[derive(Debug, Clone)]
pub struct ToolCheck {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

/// Result of running all doctor checks
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    pub checks: Vec<ToolCheck>,
}

impl DoctorReport {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_pass(&mut self, name: &str, detail: String) {
        self.checks.push(ToolCheck {
            name: name.to_string(),
            status: CheckStatus::Pass,
            detail,
        });
    }

    fn add_fail(&mut self, name: &str, detail: String) {
        self.checks.push(ToolCheck {
            name: name.to_string(),
            status: CheckStatus::Fail,
            detail,
        });
    }

    pub fn passes(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Pass)
            .count()
    }

    pub fn failures(&self) -> usize {
        self.checks.len() - self.passes()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

/// Probe the interpreter, venv module, and pip module named by `config`.
pub fn run_doctor<R: ToolRunner + ?Sized>(config: &Config, runner: &R) -> DoctorReport {
    let mut report = DoctorReport::new();
    let python = Path::new(&config.env.python);

    match runner.capture(python, &args(["--version"])) {
        Ok(out) if out.success() => {
            let version = first_line(&out.stdout, &out.stderr);
            report.add_pass("python", version);
        }
        Ok(out) => report.add_fail(
            "python",
            format!("'{} --version' exited with code {:?}", config.env.python, out.code),
        ),
        Err(e) => report.add_fail(
            "python",
            format!("'{}' not runnable: {e}", config.env.python),
        ),
    }

    // The remaining probes only make sense with a working interpreter
    if report.is_success() {
        probe_module(&mut report, runner, python, "venv", &["-m", "venv", "--help"]);
        probe_module(&mut report, runner, python, "pip", &["-m", "pip", "--version"]);
    }

    report
}

fn probe_module<R: ToolRunner + ?Sized>(
    report: &mut DoctorReport,
    runner: &R,
    python: &Path,
    name: &str,
    probe_args: &[&str],
) {
    match runner.capture(python, &args(probe_args.iter().copied())) {
        Ok(out) if out.success() => {
            report.add_pass(name, first_line(&out.stdout, &out.stderr));
        }
        Ok(out) => report.add_fail(name, format!("module probe exited with code {:?}", out.code)),
        Err(e) => report.add_fail(name, format!("module probe failed: {e}")),
    }
}

/// `python --version` historically printed to stderr; take whichever stream has content
fn first_line(stdout: &str, stderr: &str) -> String {
    let s = if stdout.trim().is_empty() { stderr } else { stdout };
    s.lines().next().unwrap_or("").trim().to_string()
}

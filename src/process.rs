//! External tool execution
//!
//! The provisioner, installer, and launcher shell out to external tools (the
//! Python interpreter, its venv and pip modules, the downstream application).
//! They go through this trait so phase sequencing can be unit-tested with a
//! scripted `MockRunner` instead of real processes.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

#[cfg(test)]
use std::path::PathBuf;

use crate::error::GoliveResult;

/// Captured output of a tool invocation
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code; None when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Abstract interface for running external tools
pub trait ToolRunner {
    /// Run a tool with inherited stdio, blocking until it exits.
    ///
    /// The child's output goes straight to the console, uninterpreted.
    /// Returns the exit code, or None if terminated by a signal.
    fn status(
        &self,
        program: &Path,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> GoliveResult<Option<i32>>;

    /// Run a tool with captured output, blocking until it exits.
    fn capture(&self, program: &Path, args: &[OsString]) -> GoliveResult<ToolOutput>;
}

/// Real tool runner backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessRunner {
    fn status(
        &self,
        program: &Path,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> GoliveResult<Option<i32>> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let status = cmd.status()?;
        Ok(status.code())
    }

    fn capture(&self, program: &Path, args: &[OsString]) -> GoliveResult<ToolOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Convenience: build an args vector from string-ish parts
pub fn args<I, S>(parts: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    parts.into_iter().map(Into::into).collect()
}

/// A recorded tool invocation (for test assertions)
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
}

/// Scripted tool runner for testing
///
/// Pops one scripted result per invocation; defaults to exit code 0 when the
/// script runs out. Records every call for assertions.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockRunner {
    pub calls: std::sync::Arc<std::sync::Mutex<Vec<RecordedCall>>>,
    results: std::sync::Arc<std::sync::Mutex<std::collections::VecDeque<GoliveResult<ToolOutput>>>>,
}

#[cfg(test)]
impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result for the next invocation
    pub fn push_result(&self, result: GoliveResult<ToolOutput>) {
        self.results.lock().unwrap().push_back(result);
    }

    /// Queue a plain exit code for the next invocation
    pub fn push_exit(&self, code: i32) {
        self.push_result(Ok(ToolOutput {
            code: Some(code),
            ..ToolOutput::default()
        }));
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next_result(&self) -> GoliveResult<ToolOutput> {
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ToolOutput {
                    code: Some(0),
                    ..ToolOutput::default()
                })
            })
    }

    fn record(&self, program: &Path, args: &[OsString], cwd: Option<&Path>) {
        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_path_buf(),
            args: args.to_vec(),
            cwd: cwd.map(Path::to_path_buf),
        });
    }
}

#[cfg(test)]
impl ToolRunner for MockRunner {
    fn status(
        &self,
        program: &Path,
        args: &[OsString],
        cwd: Option<&Path>,
    ) -> GoliveResult<Option<i32>> {
        self.record(program, args, cwd);
        self.next_result().map(|out| out.code)
    }

    fn capture(&self, program: &Path, args: &[OsString]) -> GoliveResult<ToolOutput> {
        self.record(program, args, None);
        self.next_result()
    }
}

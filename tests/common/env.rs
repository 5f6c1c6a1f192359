//! Test environment builder for isolated golive testing.
//!
//! Provides `TestEnv` - an isolated source directory and live directory in
//! tempdirs, plus helpers to run the golive CLI against them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running a golive CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    /// Temporary directory holding the source project
    pub source_root: TempDir,
    /// Temporary directory whose `live/` subdir is the deploy target
    pub target_root: TempDir,
    /// Path to the golive binary
    golive_bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            source_root: TempDir::new().expect("create source tempdir"),
            target_root: TempDir::new().expect("create target tempdir"),
            golive_bin: PathBuf::from(env!("CARGO_BIN_EXE_golive")),
        }
    }

    pub fn source_dir(&self) -> &Path {
        self.source_root.path()
    }

    /// The live directory used by `run_sync`/`run_up`
    pub fn live_dir(&self) -> PathBuf {
        self.target_root.path().join("live")
    }

    /// Write a file into the source directory
    pub fn write_source(&self, name: &str, content: &str) {
        std::fs::write(self.source_dir().join(name), content).expect("write source file");
    }

    /// Write golive.toml into the source directory
    pub fn write_config(&self, toml: &str) {
        self.write_source("golive.toml", toml);
    }

    /// Read a file from the live directory
    pub fn read_live(&self, name: &str) -> String {
        std::fs::read_to_string(self.live_dir().join(name)).expect("read live file")
    }

    /// Write a file into the live directory (simulating user edits)
    pub fn write_live(&self, name: &str, content: &str) {
        std::fs::create_dir_all(self.live_dir()).expect("create live dir");
        std::fs::write(self.live_dir().join(name), content).expect("write live file");
    }

    pub fn live_file_exists(&self, name: &str) -> bool {
        self.live_dir().join(name).exists()
    }

    /// Run golive with explicit --source/--target pointing at this env
    pub fn run(&self, subcommand: &str, extra: &[&str]) -> TestResult {
        let source = self.source_dir().to_path_buf();
        let target = self.live_dir();
        let mut args: Vec<&str> = vec![
            subcommand,
            "--source",
            source.to_str().unwrap(),
            "--target",
            target.to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        self.run_raw(&args, &[])
    }

    /// Run golive with raw args and extra env vars
    pub fn run_raw(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.golive_bin);
        cmd.current_dir(self.source_dir()).args(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute golive");
        output_to_result(output)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

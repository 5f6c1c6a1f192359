//! Error types for golive
//!
//! Uses `thiserror` for library errors; the binary wraps phases in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for golive operations
pub type GoliveResult<T> = Result<T, GoliveError>;

/// Main error type for golive operations
#[derive(Error, Debug)]
pub enum GoliveError {
    /// Live directory path exists but is not a directory
    #[error("live directory path '{path}' exists but is not a directory")]
    NotADirectory { path: PathBuf },

    /// Managed file's source is missing - fatal, a missing code file cannot be papered over
    #[error("managed source file not found: {path}")]
    SourceMissing { path: PathBuf },

    /// Copy to destination failed
    #[error("failed to copy '{path}': {message}")]
    Copy { path: PathBuf, message: String },

    /// Environment creation or inspection failed
    #[error("environment provisioning failed: {message}")]
    Provisioning { message: String },

    /// A package install failed; aborts the run before launch
    #[error("failed to install package '{package}'{}", exit_code_suffix(.code))]
    DependencyInstall { package: String, code: Option<i32> },

    /// Downstream application could not be started
    #[error("failed to launch application: {message}")]
    Launch { message: String },

    /// Downstream application exited nonzero
    #[error("application exited with code {code}")]
    Application { code: i32 },

    /// Invalid golive.toml
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" (exit code {c})"),
        None => " (terminated by signal)".to_string(),
    }
}

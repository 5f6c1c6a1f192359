//! Application launch
//!
//! Starts the downstream application with the environment's interpreter and
//! the live directory as working directory, inheriting stdio so its output
//! reaches the console verbatim. Blocks until the child exits; no timeout.

use std::path::Path;

use crate::env::VenvContext;
use crate::error::{GoliveError, GoliveResult};
use crate::process::{args, ToolRunner};

/// Launch `entry` inside `venv` with `live_dir` as working directory.
///
/// Returns the child's exit code; the caller surfaces it as its own. The
/// application is expected to read its data file from the working directory
/// and write its own `output/` and `cache/` artifacts there.
pub fn launch_app<R: ToolRunner + ?Sized>(
    venv: &VenvContext,
    entry: &str,
    live_dir: &Path,
    runner: &R,
) -> GoliveResult<i32> {
    let code = runner
        .status(&venv.python(), &args([entry]), Some(live_dir))
        .map_err(|e| GoliveError::Launch {
            message: format!("cannot start '{entry}': {e}"),
        })?;

    code.ok_or_else(|| GoliveError::Launch {
        message: format!("'{entry}' was terminated by a signal"),
    })
}

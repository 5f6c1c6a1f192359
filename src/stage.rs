//! Directory Stager
//!
//! Ensures the live deployment directory exists before any other phase runs.
//! Idempotent: an already-existing directory is reused, never recreated or
//! cleaned. The live directory is owned by the deploying user - golive only
//! ever creates it.

use std::path::Path;

use crate::error::{GoliveError, GoliveResult};
use crate::fs::FileSystem;

/// Outcome of staging the live directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// Directory was created (first run against this target)
    Created,
    /// Directory already existed and is reused as-is
    Reused,
}

/// Ensure a directory exists at `live_dir`, creating intermediate segments.
///
/// Fails with `NotADirectory` if the path exists as a regular file.
pub fn stage_live_dir<FS: FileSystem + ?Sized>(
    live_dir: &Path,
    fs: &FS,
) -> GoliveResult<StageOutcome> {
    if fs.exists(live_dir) {
        if !fs.is_dir(live_dir) {
            return Err(GoliveError::NotADirectory {
                path: live_dir.to_path_buf(),
            });
        }
        return Ok(StageOutcome::Reused);
    }

    fs.create_dir_all(live_dir)?;
    Ok(StageOutcome::Created)
}

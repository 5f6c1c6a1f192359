//! Sync plan module - separates policy decisions from file transfer
//!
//! Stage 1: plan_sync() - resolve each managed file's destination state and
//! apply its overwrite policy, no writes

use std::path::{Path, PathBuf};

use crate::error::{GoliveError, GoliveResult};
use crate::fs::FileSystem;
use crate::sync::{ManagedFile, OverwritePolicy};

/// Per-file decision produced by planning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Copy source over destination unconditionally
    Overwrite,
    /// Destination absent: copy once for first-time setup
    FirstCopy,
    /// Destination present and policy is Preserve: perform no write
    Preserve,
}

/// One planned file: the managed file, its resolved destination, and the action
#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub file: ManagedFile,
    pub dest: PathBuf,
    pub action: SyncAction,
}

/// Result of planning a sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncPlan {
    pub entries: Vec<PlannedFile>,
}

impl SyncPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files the execute stage will write
    pub fn writes(&self) -> impl Iterator<Item = &PlannedFile> {
        self.entries
            .iter()
            .filter(|e| e.action != SyncAction::Preserve)
    }

    pub fn total_files(&self) -> usize {
        self.entries.len()
    }
}

/// Plan a sync operation against the live directory.
///
/// This stage does NOT write any files. Per-file decision:
/// - policy Overwrite → Overwrite (regardless of destination state)
/// - policy Preserve, destination absent → FirstCopy
/// - policy Preserve, destination present → Preserve
///
/// A missing source file is fatal here, before anything is written.
/// Files are independent; there is no ordering dependency between them.
pub fn plan_sync<FS: FileSystem + ?Sized>(
    files: &[ManagedFile],
    live_dir: &Path,
    fs: &FS,
) -> GoliveResult<SyncPlan> {
    let mut plan = SyncPlan::new();

    for file in files {
        if !fs.exists(&file.source) {
            return Err(GoliveError::SourceMissing {
                path: file.source.clone(),
            });
        }

        let dest = live_dir.join(&file.dest_name);
        let action = match file.policy {
            OverwritePolicy::Overwrite => SyncAction::Overwrite,
            OverwritePolicy::Preserve => {
                // Check-then-act: racy under concurrent runs, which are
                // unsupported (single invoking user assumed)
                if fs.exists(&dest) {
                    SyncAction::Preserve
                } else {
                    SyncAction::FirstCopy
                }
            }
        };

        plan.entries.push(PlannedFile {
            file: file.clone(),
            dest,
            action,
        });
    }

    Ok(plan)
}

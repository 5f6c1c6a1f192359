//! Selective Synchronizer
//!
//! Copies managed files from the source tree into the live directory under a
//! per-file overwrite policy. Two-stage design:
//!
//! - Stage 1: `plan::plan_sync()` - inspect destination state, assign an
//!   action per file, no writes
//! - Stage 2: `execute::execute_sync()` - perform the copies atomically
//!
//! The single invariant the whole tool exists to protect lives here: a
//! `Preserve` file already present in the live directory is never written,
//! no matter how many times a run is repeated.

pub mod plan;

mod execute;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use execute::execute_sync;
pub use plan::{plan_sync, SyncAction, SyncPlan};

/// Governs whether a managed file's destination is replaced on each run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Destination reflects the latest source version on every run
    #[default]
    Overwrite,
    /// Destination is written only if absent; an existing copy holds live,
    /// user-modified state and must not be touched
    Preserve,
}

/// A file golive is responsible for synchronizing
#[derive(Debug, Clone)]
pub struct ManagedFile {
    /// Absolute (or source-root resolved) path of the source file
    pub source: PathBuf,
    /// Destination filename inside the live directory
    pub dest_name: String,
    pub policy: OverwritePolicy,
}

/// Options for sync operations
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Dry run - plan and report, don't write
    pub dry_run: bool,
}

/// Result of a sync run, one entry per managed file
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Destinations overwritten from source
    pub written: Vec<String>,
    /// Destinations overwritten whose content already matched the source
    pub unchanged: Vec<String>,
    /// Destinations copied for first-time setup
    pub first_copies: Vec<String>,
    /// Destinations skipped to preserve live data
    pub preserved: Vec<String>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total files handled by this run
    pub fn total_files(&self) -> usize {
        self.written.len() + self.unchanged.len() + self.first_copies.len() + self.preserved.len()
    }
}

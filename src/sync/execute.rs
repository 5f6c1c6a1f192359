//! Sync execution module - performs the copies a plan calls for
//!
//! Stage 2: execute_sync() - atomic file transfer per planned action

use crate::error::{GoliveError, GoliveResult};
use crate::fs::{hash_content, FileSystem};
use crate::sync::plan::{SyncAction, SyncPlan};
use crate::sync::{SyncOptions, SyncReport};

/// Execute a sync plan against the live directory.
///
/// An Overwrite whose destination already holds the source content is still
/// executed (the policy is unconditional) but reported as unchanged. With
/// `dry_run` set, nothing is written and the report shows what a real run
/// would do.
pub fn execute_sync<FS: FileSystem + ?Sized>(
    plan: &SyncPlan,
    options: &SyncOptions,
    fs: &FS,
) -> GoliveResult<SyncReport> {
    let mut report = SyncReport::new();

    for entry in &plan.entries {
        let name = entry.file.dest_name.clone();

        match entry.action {
            SyncAction::Preserve => {
                report.preserved.push(name);
            }
            SyncAction::FirstCopy => {
                if !options.dry_run {
                    copy_file(fs, entry)?;
                }
                report.first_copies.push(name);
            }
            SyncAction::Overwrite => {
                let content = fs.read(&entry.file.source)?;
                let already_current = fs.exists(&entry.dest)
                    && fs.hash_file(&entry.dest)? == hash_content(&content);

                if !options.dry_run {
                    fs.write_atomic(&entry.dest, &content).map_err(|e| {
                        GoliveError::Copy {
                            path: entry.dest.clone(),
                            message: e.to_string(),
                        }
                    })?;
                }

                if already_current {
                    report.unchanged.push(name);
                } else {
                    report.written.push(name);
                }
            }
        }
    }

    Ok(report)
}

fn copy_file<FS: FileSystem + ?Sized>(
    fs: &FS,
    entry: &crate::sync::plan::PlannedFile,
) -> GoliveResult<()> {
    let content = fs.read(&entry.file.source)?;
    fs.write_atomic(&entry.dest, &content)
        .map_err(|e| GoliveError::Copy {
            path: entry.dest.clone(),
            message: e.to_string(),
        })
}

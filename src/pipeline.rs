//! Deployment pipeline
//!
//! Sequences the phases of a run: stage → sync → provision → install →
//! launch. Strictly sequential, fail-fast: the first failing phase aborts the
//! run and nothing already completed is rolled back - a corrected rerun
//! resumes safely because every phase is idempotent.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;
use crate::env::{install_packages, launch_app, provision_venv, ProvisionOutcome};
use crate::error::GoliveError;
use crate::fs::FileSystem;
use crate::process::ToolRunner;
use crate::stage::{stage_live_dir, StageOutcome};
use crate::sync::{execute_sync, plan_sync, ManagedFile, SyncOptions, SyncReport};

/// Pipeline phase, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Stage,
    Sync,
    Provision,
    Install,
    Launch,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Stage => "stage",
            Phase::Sync => "sync",
            Phase::Provision => "provision",
            Phase::Install => "install",
            Phase::Launch => "launch",
        };
        f.write_str(name)
    }
}

/// A phase failure, tagged with the phase it happened in
#[derive(Error, Debug)]
#[error("{phase} phase failed: {source}")]
pub struct PipelineError {
    pub phase: Phase,
    #[source]
    pub source: GoliveError,
}

fn in_phase(phase: Phase) -> impl Fn(GoliveError) -> PipelineError {
    move |source| PipelineError { phase, source }
}

/// How far the pipeline runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// All phases, through application launch
    #[default]
    Full,
    /// Stage and sync only
    SyncOnly,
}

/// Options for a pipeline run
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub mode: RunMode,
    /// Report sync decisions without writing; implies stopping before provision
    pub dry_run: bool,
}

/// Progress notifications emitted as phases complete
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    Staged {
        live_dir: PathBuf,
        outcome: StageOutcome,
    },
    Synced(SyncReport),
    Provisioned {
        env_root: PathBuf,
        outcome: ProvisionOutcome,
    },
    Installing {
        package: String,
    },
    Launching {
        entry: String,
    },
}

/// Resolve the configured managed-file set against the source directory
pub fn managed_files(source: &Path, config: &Config) -> Vec<ManagedFile> {
    config
        .files
        .iter()
        .map(|entry| ManagedFile {
            source: source.join(&entry.source),
            dest_name: entry.dest_name(),
            policy: entry.policy,
        })
        .collect()
}

/// Run the deployment pipeline.
///
/// Returns the downstream application's exit code (0 for sync-only and
/// dry-run modes, which never launch it).
pub fn run_deploy<FS, R, F>(
    source: &Path,
    config: &Config,
    options: PipelineOptions,
    fs: &FS,
    runner: &R,
    mut on_event: F,
) -> Result<i32, PipelineError>
where
    FS: FileSystem + ?Sized,
    R: ToolRunner + ?Sized,
    F: FnMut(PipelineEvent),
{
    let live_dir = config.resolve_live_dir(source);

    // INIT → DIR_READY
    let staged = stage_live_dir(&live_dir, fs).map_err(in_phase(Phase::Stage))?;
    on_event(PipelineEvent::Staged {
        live_dir: live_dir.clone(),
        outcome: staged,
    });

    // DIR_READY → FILES_SYNCED
    let files = managed_files(source, config);
    let plan = plan_sync(&files, &live_dir, fs).map_err(in_phase(Phase::Sync))?;
    let sync_options = SyncOptions {
        dry_run: options.dry_run,
    };
    let report = execute_sync(&plan, &sync_options, fs).map_err(in_phase(Phase::Sync))?;
    on_event(PipelineEvent::Synced(report));

    if options.dry_run || options.mode == RunMode::SyncOnly {
        return Ok(0);
    }

    // FILES_SYNCED → ENV_READY
    let (venv, provisioned) =
        provision_venv(&live_dir, &config.env, fs, runner).map_err(in_phase(Phase::Provision))?;
    on_event(PipelineEvent::Provisioned {
        env_root: venv.root().to_path_buf(),
        outcome: provisioned,
    });

    // ENV_READY → DEPS_INSTALLED
    install_packages(&venv, &config.env.packages, runner, |package| {
        on_event(PipelineEvent::Installing {
            package: package.to_string(),
        });
    })
    .map_err(in_phase(Phase::Install))?;

    // DEPS_INSTALLED → RUNNING → DONE
    on_event(PipelineEvent::Launching {
        entry: config.run.entry.clone(),
    });
    launch_app(&venv, &config.run.entry, &live_dir, runner).map_err(in_phase(Phase::Launch))
}

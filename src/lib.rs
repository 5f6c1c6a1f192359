//! golive - local deployment bootstrap
//!
//! golive materializes a self-contained live instance of an application next
//! to its development checkout: it stages a live directory, synchronizes
//! managed files into it under per-file overwrite policy (code follows the
//! source, live data is never clobbered), provisions an isolated virtualenv,
//! installs the dependency set, and hands off execution to the application.

pub mod config;
pub mod doctor;
pub mod env;
pub mod error;
pub mod fs;
pub mod pipeline;
pub mod process;
pub mod stage;
pub mod sync;

// Re-exports for convenience
pub use config::{env_dry_run, Config, ConfigWarning, EnvConfig, FileEntry, RunConfig};
pub use doctor::{run_doctor, CheckStatus, DoctorReport, ToolCheck};
pub use env::{install_packages, launch_app, provision_venv, ProvisionOutcome, VenvContext};
pub use error::{GoliveError, GoliveResult};
pub use fs::{FileSystem, LocalFs};
pub use pipeline::{run_deploy, Phase, PipelineError, PipelineEvent, PipelineOptions, RunMode};
pub use process::{ProcessRunner, ToolOutput, ToolRunner};
pub use stage::{stage_live_dir, StageOutcome};
pub use sync::{
    execute_sync, plan_sync, ManagedFile, OverwritePolicy, SyncAction, SyncOptions, SyncPlan,
    SyncReport,
};

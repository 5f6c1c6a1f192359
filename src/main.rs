//! golive CLI - local deployment bootstrap
//!
//! Usage: golive <COMMAND>
//!
//! Commands:
//!   up      Stage, sync, provision, and launch the live instance
//!   sync    Stage the live directory and sync managed files only
//!   doctor  Probe the external tools golive depends on

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use golive::config::Config;
use golive::doctor::{run_doctor, CheckStatus};
use golive::env::ProvisionOutcome;
use golive::fs::LocalFs;
use golive::pipeline::{run_deploy, PipelineEvent, PipelineOptions, RunMode};
use golive::process::ProcessRunner;
use golive::stage::StageOutcome;
use golive::sync::SyncReport;
use golive::GoliveError;

/// golive - local deployment bootstrap
#[derive(Parser, Debug)]
#[command(name = "golive")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for CI
    #[arg(long, default_value = "false")]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stage, sync, provision, and launch the live instance
    Up {
        /// Source project directory
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Live directory (overrides golive.toml)
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Dry run - report sync decisions without writing or launching
        #[arg(long)]
        dry_run: bool,
    },

    /// Stage the live directory and sync managed files only
    Sync {
        /// Source project directory
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Live directory (overrides golive.toml)
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Dry run - report sync decisions without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Probe the external tools golive depends on
    Doctor {
        /// Source project directory (for golive.toml)
        #[arg(short, long, default_value = ".")]
        source: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Up {
            source,
            target,
            dry_run,
        } => cmd_run(&source, target, dry_run, RunMode::Full, cli.json, cli.verbose),
        Commands::Sync {
            source,
            target,
            dry_run,
        } => cmd_run(
            &source,
            target,
            dry_run,
            RunMode::SyncOnly,
            cli.json,
            cli.verbose,
        ),
        Commands::Doctor { source } => cmd_doctor(&source, cli.json),
    }
}

fn load_config(source: &Path, target: Option<PathBuf>, json: bool) -> Config {
    let config_path = source.join("golive.toml");
    let mut config = if config_path.exists() {
        match Config::load_with_warnings(&config_path) {
            Ok((config, warnings)) => {
                if !json {
                    for warning in &warnings {
                        let suggestion = warning
                            .suggestion
                            .as_ref()
                            .map(|s| format!(" (did you mean '{s}'?)"))
                            .unwrap_or_default();
                        eprintln!(
                            "⚠ Unknown config key '{}' in {}{}",
                            warning.key,
                            warning.file.display(),
                            suggestion
                        );
                    }
                }
                config.with_env_overrides()
            }
            Err(e) => {
                eprintln!("⚠ {e}; using defaults");
                Config::default().with_env_overrides()
            }
        }
    } else {
        Config::default().with_env_overrides()
    };

    if let Some(target) = target {
        config.live_dir = target;
    }
    config
}

fn cmd_run(
    source: &Path,
    target: Option<PathBuf>,
    dry_run: bool,
    mode: RunMode,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let config = load_config(source, target, json);
    let dry_run = dry_run || golive::config::env_dry_run();

    if !json {
        match mode {
            RunMode::Full => println!("📦 golive Up"),
            RunMode::SyncOnly => println!("📦 golive Sync"),
        }
        println!("Source: {}", source.display());
        println!("Target: {}", config.resolve_live_dir(source).display());
        if dry_run {
            println!("Mode: Dry run");
        }
        if verbose > 0 {
            println!("Python: {}", config.env.python);
            println!("Packages: {}", config.env.packages.join(", "));
        }
        println!();
    }

    let fs = LocalFs::new();
    let runner = ProcessRunner::new();
    let options = PipelineOptions { mode, dry_run };

    let mut last_report: Option<SyncReport> = None;
    let result = run_deploy(source, &config, options, &fs, &runner, |event| {
        if let PipelineEvent::Synced(report) = &event {
            last_report = Some(report.clone());
        }
        if !json {
            print_event(&event);
        }
    });

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            if json {
                let output = serde_json::json!({
                    "event": "deploy",
                    "status": "failed",
                    "phase": e.phase.to_string(),
                    "error": e.source.to_string(),
                });
                println!("{}", serde_json::to_string(&output)?);
            }
            return Err(e.into());
        }
    };

    if json {
        let report = last_report.unwrap_or_default();
        let output = serde_json::json!({
            "event": "deploy",
            "status": "success",
            "mode": match mode { RunMode::Full => "up", RunMode::SyncOnly => "sync" },
            "dry_run": dry_run,
            "written": report.written,
            "unchanged": report.unchanged,
            "first_copies": report.first_copies,
            "preserved": report.preserved,
            "exit_code": code,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else if mode == RunMode::Full && !dry_run {
        println!();
        if code == 0 {
            println!("✓ Application exited with code 0");
        }
    }

    if code != 0 {
        if !json {
            eprintln!("✗ {}", GoliveError::Application { code });
        }
        // Surface the child's exit status as our own
        std::process::exit(code);
    }

    Ok(())
}

fn print_event(event: &PipelineEvent) {
    match event {
        PipelineEvent::Staged { live_dir, outcome } => match outcome {
            StageOutcome::Created => {
                println!("✓ Created live directory {}", live_dir.display());
            }
            StageOutcome::Reused => {
                println!("✓ Reusing live directory {}", live_dir.display());
            }
        },
        PipelineEvent::Synced(report) => {
            for name in &report.written {
                println!("  ✓ {name}: overwritten from source");
            }
            for name in &report.unchanged {
                println!("  ✓ {name}: unchanged");
            }
            for name in &report.first_copies {
                println!("  ✓ {name}: copied for first-time setup");
            }
            for name in &report.preserved {
                println!("  ⚠ {name}: skipping copy to preserve live data");
            }
            println!("✓ Synced {} files", report.total_files());
        }
        PipelineEvent::Provisioned { env_root, outcome } => match outcome {
            ProvisionOutcome::Created => {
                println!("✓ Created environment at {}", env_root.display());
            }
            ProvisionOutcome::Reused => {
                println!("✓ Reusing existing environment at {}", env_root.display());
            }
        },
        PipelineEvent::Installing { package } => {
            println!("→ Installing {package}");
        }
        PipelineEvent::Launching { entry } => {
            println!("🚀 Launching {entry}");
        }
    }
}

fn cmd_doctor(source: &Path, json: bool) -> Result<()> {
    let config = load_config(source, None, json);
    let runner = ProcessRunner::new();

    if !json {
        println!("🩺 golive Doctor");
        println!("Interpreter: {}", config.env.python);
        println!();
    }

    let report = run_doctor(&config, &runner);

    if json {
        let checks: Vec<serde_json::Value> = report
            .checks
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "status": match c.status {
                        CheckStatus::Pass => "pass",
                        CheckStatus::Fail => "fail",
                    },
                    "detail": c.detail,
                })
            })
            .collect();
        let output = serde_json::json!({
            "event": "doctor",
            "status": if report.is_success() { "success" } else { "failed" },
            "checks": checks,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for check in &report.checks {
            match check.status {
                CheckStatus::Pass => println!("  ✓ {}: {}", check.name, check.detail),
                CheckStatus::Fail => println!("  ✗ {}: {}", check.name, check.detail),
            }
        }
        println!();
        println!(
            "📊 {} passed, {} failed",
            report.passes(),
            report.failures()
        );
    }

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

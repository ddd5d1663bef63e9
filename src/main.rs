//! lib-check - npm package watch list CLI
//!
//! Tracks a personal list of npm packages, reports their latest versions,
//! classifies changes against a saved snapshot and summarizes dependencies
//! and bundle sizes across the watch list or a preset.

use anyhow::Context;
use clap::Parser;
use lib_check::cli::{CliArgs, Command, ConfigArgs};
use lib_check::domain::{validate_package_name, ChangeKind, WatchListChange};
use lib_check::orchestrator::Orchestrator;
use lib_check::output::{create_formatter, ConfigEvent, ConfigView, OutputConfig, OutputFormatter};
use lib_check::presets::{self, CATEGORIES};
use lib_check::settings::{self, Settings};
use lib_check::store::{JsonFileStore, WatchRepository};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit code when some lookups failed but the command otherwise completed
const PARTIAL_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.log_level());

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG takes precedence over the CLI verbosity
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn exit_code(partial: bool) -> ExitCode {
    if partial {
        ExitCode::from(PARTIAL_FAILURE)
    } else {
        ExitCode::SUCCESS
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config_dir = settings::config_dir();
    debug!(config_dir = %config_dir.display(), "resolved configuration directory");

    let settings = Settings::load(&config_dir)?;
    let store = JsonFileStore::open(settings::store_path(&config_dir))?;
    let mut repo = WatchRepository::new(store);

    let formatter = create_formatter(&OutputConfig::from_cli(args.json, args.no_color));
    let mut stdout = io::stdout();
    let orchestrator = || -> anyhow::Result<Orchestrator> {
        let orchestrator = Orchestrator::from_settings(&settings)
            .context("failed to create HTTP client")?;
        Ok(orchestrator.with_progress(args.show_progress()))
    };

    let code = match &args.command {
        Command::Config(config) => {
            run_config(config, &mut repo, &config_dir, &*formatter, &mut stdout)?
        }

        Command::Add {
            packages,
            skip_verify,
        } => {
            let user = repo.require_user_id()?;
            for package in packages {
                validate_package_name(package)?;
            }

            if !skip_verify {
                let orchestrator = orchestrator()?;
                for package in packages {
                    orchestrator
                        .verify_package(package)
                        .await
                        .with_context(|| format!("cannot add '{}'", package))?;
                }
            }

            let mut changes = Vec::with_capacity(packages.len());
            for package in packages {
                let kind = if repo.add_library(&user, package)? {
                    ChangeKind::Added
                } else {
                    ChangeKind::AlreadyPresent
                };
                changes.push(WatchListChange::new(package, kind));
            }
            formatter.format_changes(&changes, &mut stdout)?;
            ExitCode::SUCCESS
        }

        Command::Remove { package } => {
            let user = repo.require_user_id()?;
            let kind = if repo.remove_library(&user, package)? {
                ChangeKind::Removed
            } else {
                ChangeKind::NotPresent
            };
            formatter.format_changes(&[WatchListChange::new(package, kind)], &mut stdout)?;
            ExitCode::SUCCESS
        }

        Command::List => {
            let user = repo.require_user_id()?;
            let libraries = repo.libraries(&user)?;
            formatter.format_watch_list(&user, &libraries, &mut stdout)?;
            ExitCode::SUCCESS
        }

        Command::Search { text } => {
            let hits = orchestrator()?.search(text).await?;
            formatter.format_search(text, &hits, &mut stdout)?;
            ExitCode::SUCCESS
        }

        Command::Check { detailed } => {
            let user = repo.require_user_id()?;
            let libraries = repo.libraries(&user)?;
            let saved = repo.saved_versions(&user)?;

            let report = orchestrator()?
                .check(&libraries, &saved, *detailed)
                .await;
            formatter.format_check(&report, &mut stdout)?;
            exit_code(report.is_partial())
        }

        Command::SaveVersions => {
            let user = repo.require_user_id()?;
            let libraries = repo.libraries(&user)?;
            let previous = repo.saved_versions(&user)?;

            let report = orchestrator()?.snapshot_versions(&libraries).await;
            repo.save_versions(&user, &report.merged_with(&previous))?;
            formatter.format_snapshot(&report, &mut stdout)?;
            exit_code(!report.errors.is_empty())
        }

        Command::Preset { category } => {
            match category {
                Some(key) => {
                    let category = presets::category(key)?;
                    formatter.format_presets(std::slice::from_ref(category), true, &mut stdout)?;
                }
                None => formatter.format_presets(CATEGORIES, false, &mut stdout)?,
            }
            ExitCode::SUCCESS
        }

        Command::Preview {
            category,
            preset,
            detailed,
            add,
        } => {
            let preset = presets::find_preset(category, preset)?;
            // --add needs a user before any lookup runs
            let user = if *add {
                Some(repo.require_user_id()?)
            } else {
                repo.user_id()?
            };
            let watch_list = match &user {
                Some(user) => repo.libraries(user)?,
                None => Vec::new(),
            };

            let mut report = orchestrator()?
                .preview(category, preset, &watch_list, *detailed)
                .await;

            if let (true, Some(user)) = (*add, &user) {
                for package in preset.packages {
                    let kind = if repo.add_library(user, package)? {
                        ChangeKind::Added
                    } else {
                        ChangeKind::AlreadyPresent
                    };
                    report.changes.push(WatchListChange::new(*package, kind));
                }
            }

            formatter.format_preview(&report, &mut stdout)?;
            exit_code(report.batch.is_partial())
        }
    };

    stdout.flush()?;
    Ok(code)
}

fn run_config(
    config: &ConfigArgs,
    repo: &mut WatchRepository<JsonFileStore>,
    config_dir: &Path,
    formatter: &dyn OutputFormatter,
    writer: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    let event = if let Some(id) = &config.change {
        let previous_user_id = repo.change_user_id(id)?;
        ConfigEvent::Changed { previous_user_id }
    } else if config.reset {
        repo.reset()?;
        ConfigEvent::Reset
    } else {
        ConfigEvent::Show
    };

    let user_id = repo.user_id()?;
    let library_count = match &user_id {
        Some(user) => repo.libraries(user)?.len(),
        None => 0,
    };

    formatter.format_config(
        &ConfigView {
            event,
            user_id,
            library_count,
            config_dir: config_dir.to_path_buf(),
        },
        writer,
    )?;
    Ok(ExitCode::SUCCESS)
}

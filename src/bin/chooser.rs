//! Finger chooser command-line driver

use std::time::Duration;

use anyhow::Context;
use finger_chooser::app::cli::{Cli, Commands};
use finger_chooser::app::{AppConfig, Replay, Scenario, format_report};
use finger_chooser::{build_info, health};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Replay {
            file,
            seed,
            realtime,
            frame_ms,
        } => {
            let config = load_config(cli.profile.as_deref());
            let scenario = Scenario::load(&file)?;

            let mut replay = Replay::new(&config, scenario)
                .with_context(|| format!("scenario {} has invalid settings", file.display()))?;
            if let Some(seed) = seed {
                replay = replay.with_seed(seed);
            }

            let report = if realtime {
                let runtime =
                    tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
                runtime.block_on(replay.run_realtime(Duration::from_millis(frame_ms.max(1))))
            } else {
                replay.run()
            };

            println!("{}", format_report(&report));
        }
        Commands::Health => {
            info!(version = %build_info::version_string(), "Running health checks");
            let report = health::run_all_checks();
            health::print_report(&report);
            std::process::exit(report.exit_code());
        }
        Commands::Info => {
            println!("{}", build_info::detailed_info());
            let config = load_config(cli.profile.as_deref());
            println!("Profile: {}", config.profile);
        }
    }

    Ok(())
}

fn load_config(profile: Option<&str>) -> AppConfig {
    let loaded = match profile {
        Some(profile) => AppConfig::load(profile),
        None => AppConfig::load_from_env(),
    };

    match loaded {
        Ok(config) => {
            info!(profile = %config.profile, "Configuration loaded");
            config
        }
        Err(e) => {
            warn!(error = %e, "Failed to load config, using built-in defaults");
            AppConfig::builtin()
        }
    }
}

//! Work Order RS command line
//!
//! Replays JSON scenarios through the lifecycle manager against in-memory
//! stores and prints what happened.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wo_core::config::{AppConfig, LogFormat, LoggingConfig};

mod scenario;

use scenario::{Replay, Scenario};

#[derive(Debug, Parser)]
#[command(name = "wo", version, about = "Work order lifecycle tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply a scenario file and print each outcome plus the final state
    Replay {
        /// Path to the scenario JSON
        file: PathBuf,
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env().context("invalid configuration")?;

    // Logs go to stderr so stdout stays machine readable
    init_tracing(&config.logging);

    let cli = Cli::parse();
    match cli.command {
        Command::Replay { file, compact } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let scenario: Scenario = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", file.display()))?;

            info!(
                file = %file.display(),
                operations = scenario.operations.len(),
                missing_item_policy = %config.lifecycle.missing_item_policy,
                optimistic_locking = config.store.optimistic_locking,
                "Replaying scenario"
            );

            let report = Replay::new(config).run(scenario).await?;
            let output = if compact {
                serde_json::to_string(&report)?
            } else {
                serde_json::to_string_pretty(&report)?
            };
            println!("{}", output);
        }
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

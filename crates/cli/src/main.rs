//! # Device Time Survey CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Configuration loading and validation
//! - Survey ingestion and grouped offset statistics
//! - Text / JSON report output

mod cli;
mod commands;
mod error;
mod report;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_report, run_validate};

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "dts-report starting");

    let result = match &cli.command {
        Commands::Run(args) => run_report(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let (level, force_level) = if cli.quiet {
        ("warn", true)
    } else {
        match cli.verbose {
            0 => ("info", false),
            1 => ("debug", false),
            _ => ("trace", false),
        }
    };

    observability::init_with_config(ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: level.to_string(),
        force_level,
    })
}

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// dts-report - grouped offset statistics for device time surveys
#[derive(Parser, Debug)]
#[command(
    name = "dts-report",
    author,
    version,
    about = "Device time survey ingestion and offset statistics",
    long_about = "Reads pipe-delimited device time survey files, classifies each device's \n\
                  clock offset against eight threshold windows and reports offset \n\
                  statistics grouped by device type, connection mode and threshold bucket."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "DTS_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "DTS_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest survey files and print the offset report
    Run(RunArgs),

    /// Validate configuration file without ingesting
    Validate(ValidateArgs),

    /// Display configuration and threshold window information
    Info(InfoArgs),
}

/// Survey source selection shared by `run` and `info`
#[derive(Parser, Debug, Clone)]
pub struct SourceArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "DTS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Survey file to read; overrides the configured directory and file name
    #[arg(short, long, env = "DTS_FILE")]
    pub file: Option<PathBuf>,

    /// Override the field separator
    #[arg(long, env = "DTS_SEPARATOR")]
    pub separator: Option<String>,

    /// Override the number of header lines skipped per file
    #[arg(long, env = "DTS_HEADER_LINES")]
    pub header_lines: Option<usize>,

    /// Keep empty fields in place instead of collapsing consecutive separators
    #[arg(long)]
    pub preserve_empty_fields: bool,
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Additional survey files, ingested independently and merged into one report
    #[arg(long = "input", value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the JSON report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include every accepted record in JSON output
    #[arg(long)]
    pub records: bool,

    /// Fail when any row was rejected
    #[arg(long)]
    pub strict: bool,

    /// Write the run's ingestion counters to this file (Prometheus text format)
    #[arg(long, value_name = "FILE")]
    pub metrics_out: Option<PathBuf>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "survey.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show threshold windows and their sentinel labels
    #[arg(long)]
    pub windows: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

//! # Observability
//!
//! Tracing setup and ingestion metrics.
//!
//! ## Features
//!
//! - Tracing initialization (JSON / Pretty / Compact)
//! - `metrics` facade counters for the ingestion pass
//! - Prometheus text rendering of those counters via [`capture_metrics`]
//!
//! Outside [`capture_metrics`] the counters go to whatever global recorder the
//! host process installed, and nowhere if it installed none.
//!
//! ## Usage
//!
//! ```ignore
//! use observability::{init_with_config, ObservabilityConfig, LogFormat};
//!
//! init_with_config(ObservabilityConfig {
//!     log_format: LogFormat::Compact,
//!     ..Default::default()
//! })?;
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use crate::metrics::{
    capture_metrics, record_header_skipped, record_line_read, record_row_accepted,
    record_row_rejected,
};

/// Initialize tracing with defaults (JSON, `info`, honours `RUST_LOG`)
pub fn init() -> Result<()> {
    init_with_config(ObservabilityConfig::default())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log format
    pub log_format: LogFormat,
    /// Level used when `RUST_LOG` is unset
    pub default_log_level: String,
    /// Ignore `RUST_LOG` and always use `default_log_level`
    pub force_level: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            default_log_level: "info".to_string(),
            force_level: false,
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs
    #[default]
    Json,
    /// Human readable
    Pretty,
    /// Compact single line
    Compact,
}

/// Initialize with a custom configuration
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let filter = if config.force_level {
        EnvFilter::new(&config.default_log_level)
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level))
    };

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        log_format = ?config.log_format,
        level = %config.default_log_level,
        "Observability initialized"
    );

    Ok(())
}

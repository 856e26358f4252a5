//! Error types for CLI operations.

use std::path::PathBuf;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Neither a configuration file nor a survey file was given
    #[error("No survey source: pass --config or --file")]
    MissingSource,

    /// A fatal error stopped ingestion of one source
    #[error("Ingestion of {path} aborted: {message}")]
    IngestionAborted { path: PathBuf, message: String },

    /// Rows were rejected while running in strict mode
    #[error("{count} row(s) rejected")]
    RejectedRows { count: usize },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn ingestion_aborted(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IngestionAborted {
            path: path.into(),
            message: message.into(),
        }
    }
}

//! Ingestion error types
//!
//! Two tiers: [`IngestionError`] aborts a run, [`RowError`] only discards one row.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Run-level (fatal) error
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Survey file could not be opened
    #[error("failed to open survey file {path}: {source}")]
    Open {
        /// Resolved file path
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from the line source failed
    #[error("failed to read {source_name} at line {line_number}: {source}")]
    Read {
        /// Source identifier (file name)
        source_name: String,
        /// 1-based physical line being read
        line_number: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Row-level (recoverable) error
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowError {
    /// The row ran out of tokens
    #[error("missing field '{field}' at position {position}")]
    MissingField {
        /// Field name
        field: &'static str,
        /// 1-based token position
        position: usize,
    },

    /// An integer field did not parse
    #[error("field '{field}' at position {position} is not a valid integer: '{value}'")]
    InvalidNumber {
        /// Field name
        field: &'static str,
        /// 1-based token position
        position: usize,
        /// Offending token
        value: String,
    },
}

impl RowError {
    /// Short stable tag for metrics labels
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::InvalidNumber { .. } => "invalid_number",
        }
    }

    /// 1-based position of the offending token
    pub fn position(&self) -> usize {
        match self {
            Self::MissingField { position, .. } | Self::InvalidNumber { position, .. } => {
                *position
            }
        }
    }
}

/// Ingestion Result alias
pub type Result<T> = std::result::Result<T, IngestionError>;

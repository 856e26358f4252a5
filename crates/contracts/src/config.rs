//! SurveyConfig - Config Loader output
//!
//! Describes where the survey file lives and how its lines are laid out.
//! Fixed for the duration of a run; there is no mid-run reconfiguration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Default column separator
pub const SEP_PIPE: &str = "|";

/// Default number of qualifying header lines skipped per file
pub const DEFAULT_HEADER_LINES: usize = 5;

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete survey configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SurveyConfig {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Survey file location and layout
    #[validate(nested)]
    pub source: SourceConfig,
}

/// How consecutive separators are tokenized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyFieldPolicy {
    /// Consecutive separators collapse into one; empty fields vanish and every
    /// later field shifts left. This is how the survey files have always been read.
    #[default]
    Collapse,
    /// Every separator ends a field; empty fields keep their position.
    Preserve,
}

/// Survey file location and line layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SourceConfig {
    /// Directory holding the survey file
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Survey file name, also used to identify the file in row diagnostics
    #[validate(length(min = 1, message = "file_name cannot be empty"))]
    pub file_name: String,

    /// Column separator. A line qualifies as data only if it contains this
    /// string at an index greater than zero.
    #[serde(default = "default_field_separator")]
    #[validate(length(min = 1, message = "field_separator cannot be empty"))]
    pub field_separator: String,

    /// Qualifying lines discarded as header/metadata before data rows start
    #[serde(default = "default_header_lines")]
    #[validate(range(max = 10_000, message = "header_lines must be <= 10000"))]
    pub header_lines: usize,

    /// Tokenization of consecutive separators
    #[serde(default)]
    pub empty_fields: EmptyFieldPolicy,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_field_separator() -> String {
    SEP_PIPE.to_string()
}

fn default_header_lines() -> usize {
    DEFAULT_HEADER_LINES
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            file_name: String::new(),
            field_separator: default_field_separator(),
            header_lines: default_header_lines(),
            empty_fields: EmptyFieldPolicy::default(),
        }
    }
}

impl SourceConfig {
    /// Create a source config with default layout
    pub fn new(directory: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// Override the field separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.field_separator = separator.into();
        self
    }

    /// Override the header line count
    pub fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    /// Override the empty field policy
    pub fn with_empty_fields(mut self, policy: EmptyFieldPolicy) -> Self {
        self.empty_fields = policy;
        self
    }

    /// Full path of the survey file
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

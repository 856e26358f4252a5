//! Survey config formats
//!
//! TOML is the usual format; JSON is accepted for generated configs.

use std::path::Path;

use contracts::{ContractError, SurveyConfig};

/// Format of a survey config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Map a file extension (case-insensitive, without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    /// Format implied by a config file's extension
    pub fn from_path(path: &Path) -> Result<Self, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse(format!(
                "{} has no .toml or .json extension",
                path.display()
            ))
        })?;
        Self::from_extension(ext).ok_or_else(|| {
            ContractError::config_parse(format!("unsupported config format: .{ext}"))
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        }
    }

    /// Deserialize without validating
    pub fn parse(&self, content: &str) -> Result<SurveyConfig, ContractError> {
        let parsed: Result<SurveyConfig, _> = match self {
            Self::Toml => toml::from_str(content).map_err(boxed),
            Self::Json => serde_json::from_str(content).map_err(boxed),
        };
        parsed.map_err(|source| ContractError::ConfigParse {
            message: format!("{} parse error: {source}", self.name()),
            source: Some(source),
        })
    }

    /// Serialize as a pretty-printed document
    pub fn render(&self, config: &SurveyConfig) -> Result<String, ContractError> {
        let rendered: Result<String, _> = match self {
            Self::Toml => toml::to_string_pretty(config).map_err(boxed),
            Self::Json => serde_json::to_string_pretty(config).map_err(boxed),
        };
        rendered.map_err(|source| ContractError::ConfigParse {
            message: format!("{} serialize error: {source}", self.name()),
            source: Some(source),
        })
    }
}

fn boxed<E>(err: E) -> Box<dyn std::error::Error + Send + Sync>
where
    E: std::error::Error + Send + Sync + 'static,
{
    Box::new(err)
}

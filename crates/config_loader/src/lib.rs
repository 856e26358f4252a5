//! # Config Loader
//!
//! Loads `SurveyConfig` from TOML or JSON and checks it before ingestion starts.
//!
//! A relative `source.directory` in a config file is taken relative to the
//! file itself, so a config can sit next to the surveys it describes.
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("surveys/site_a.toml")).unwrap();
//! println!("reading {}", config.source.path().display());
//! ```

mod parser;
mod validator;

pub use contracts::SurveyConfig;
pub use parser::ConfigFormat;

use std::path::Path;

use contracts::ContractError;

/// Entry points for survey configuration
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read, parse and validate a config file.
    ///
    /// The format comes from the extension. A relative survey directory is
    /// rebased onto the config file's parent directory.
    pub fn load_from_path(path: &Path) -> Result<SurveyConfig, ContractError> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let mut config = format.parse(&content)?;

        if config.source.directory.is_relative() {
            if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                config.source.directory = base.join(&config.source.directory);
            }
        }

        validator::validate(&config)?;
        Ok(config)
    }

    /// Parse and validate config text; relative directories are left as-is
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<SurveyConfig, ContractError> {
        let config = format.parse(content)?;
        validator::validate(&config)?;
        Ok(config)
    }

    /// Check a config assembled in code (e.g. from CLI flags)
    pub fn validate(config: &SurveyConfig) -> Result<(), ContractError> {
        validator::validate(config)
    }

    pub fn to_toml(config: &SurveyConfig) -> Result<String, ContractError> {
        ConfigFormat::Toml.render(config)
    }

    pub fn to_json(config: &SurveyConfig) -> Result<String, ContractError> {
        ConfigFormat::Json.render(config)
    }
}

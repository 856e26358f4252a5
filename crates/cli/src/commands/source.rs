//! Survey source resolution shared by commands.

use anyhow::{Context, Result};
use contracts::{ConfigVersion, EmptyFieldPolicy, SourceConfig, SurveyConfig};
use std::path::Path;
use tracing::info;

use crate::cli::SourceArgs;
use crate::error::CliError;

/// Build the effective configuration: config file first, then CLI overrides
pub fn resolve_config(args: &SourceArgs) -> Result<SurveyConfig> {
    let mut config = match (&args.config, &args.file) {
        (Some(path), _) => {
            if !path.exists() {
                return Err(CliError::config_not_found(path.display().to_string()).into());
            }
            config_loader::ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        (None, Some(_)) => SurveyConfig {
            version: ConfigVersion::V1,
            source: SourceConfig::default(),
        },
        (None, None) => return Err(CliError::MissingSource.into()),
    };

    if let Some(ref file) = args.file {
        info!(file = %file.display(), "Overriding survey file from CLI");
        config.source = source_for_file(file, &config.source);
    }
    if let Some(ref separator) = args.separator {
        info!(separator = %separator, "Overriding field separator from CLI");
        config.source.field_separator = separator.clone();
    }
    if let Some(header_lines) = args.header_lines {
        info!(header_lines, "Overriding header line count from CLI");
        config.source.header_lines = header_lines;
    }
    if args.preserve_empty_fields {
        config.source.empty_fields = EmptyFieldPolicy::Preserve;
    }

    config_loader::ConfigLoader::validate(&config).context("Invalid survey configuration")?;
    Ok(config)
}

/// Same layout as `template`, reading `file` instead
pub fn source_for_file(file: &Path, template: &SourceConfig) -> SourceConfig {
    let directory = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| ".".into());
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    SourceConfig {
        directory,
        file_name,
        ..template.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> SourceArgs {
        SourceArgs {
            config: None,
            file: None,
            separator: None,
            header_lines: None,
            preserve_empty_fields: false,
        }
    }

    #[test]
    fn test_missing_source() {
        let err = resolve_config(&args()).unwrap_err();
        assert!(err.to_string().contains("--config or --file"));
    }

    #[test]
    fn test_file_only_uses_defaults() {
        let mut a = args();
        a.file = Some(PathBuf::from("/data/site_a.txt"));
        let config = resolve_config(&a).unwrap();
        assert_eq!(config.source.directory, PathBuf::from("/data"));
        assert_eq!(config.source.file_name, "site_a.txt");
        assert_eq!(config.source.field_separator, "|");
        assert_eq!(config.source.header_lines, 5);
    }

    #[test]
    fn test_overrides_apply_over_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.toml");
        std::fs::write(
            &path,
            "[source]\ndirectory = \"/srv\"\nfile_name = \"a.txt\"\nheader_lines = 2\n",
        )
        .unwrap();

        let mut a = args();
        a.config = Some(path);
        a.separator = Some(";".into());
        a.preserve_empty_fields = true;
        let config = resolve_config(&a).unwrap();

        assert_eq!(config.source.path(), PathBuf::from("/srv/a.txt"));
        assert_eq!(config.source.header_lines, 2);
        assert_eq!(config.source.field_separator, ";");
        assert_eq!(config.source.empty_fields, EmptyFieldPolicy::Preserve);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let mut a = args();
        a.file = Some(PathBuf::from("survey.txt"));
        a.separator = Some(String::new());
        assert!(resolve_config(&a).is_err());
    }

    #[test]
    fn test_source_for_bare_file_name() {
        let source = source_for_file(Path::new("survey.txt"), &SourceConfig::default());
        assert_eq!(source.directory, PathBuf::from("."));
        assert_eq!(source.path(), PathBuf::from("./survey.txt"));
    }
}

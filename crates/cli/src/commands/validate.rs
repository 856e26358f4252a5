//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    survey_file: String,
    field_separator: String,
    header_lines: usize,
    empty_fields: String,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

impl ValidationResult {
    fn invalid(config_path: String, error: String) -> Self {
        Self {
            valid: false,
            config_path,
            error: Some(error),
            warnings: None,
            summary: None,
        }
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        let error = format!("File not found: {}", args.config.display());
        return ValidationResult::invalid(config_path, error);
    }

    let config = match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(config) => config,
        Err(e) => return ValidationResult::invalid(config_path, e.to_string()),
    };

    let warnings = collect_warnings(&config);
    let source = &config.source;
    ValidationResult {
        valid: true,
        config_path,
        error: None,
        warnings: (!warnings.is_empty()).then_some(warnings),
        summary: Some(ConfigSummary {
            version: format!("{:?}", config.version),
            survey_file: source.path().display().to_string(),
            field_separator: source.field_separator.clone(),
            header_lines: source.header_lines,
            empty_fields: format!("{:?}", source.empty_fields),
        }),
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &contracts::SurveyConfig) -> Vec<String> {
    let mut warnings = Vec::new();
    let source = &config.source;

    let path = source.path();
    if !path.exists() {
        warnings.push(format!(
            "Survey file {} does not exist yet - `run` will fail",
            path.display()
        ));
    }

    if source.header_lines == 0 {
        warnings.push("header_lines is 0 - column title rows will be rejected as malformed".to_string());
    }

    if source.field_separator.chars().count() > 1 {
        warnings.push(format!(
            "field_separator {:?} has several characters - each one splits fields",
            source.field_separator
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    let Some(ref summary) = result.summary else {
        println!("✗ {} is not a usable survey config", result.config_path);
        if let Some(ref error) = result.error {
            println!("  {}", error);
        }
        return;
    };

    println!("✓ {} ({})", result.config_path, summary.version);
    println!("  reads    {}", summary.survey_file);
    println!(
        "  layout   separator {:?}, {} header line(s), empty fields: {}",
        summary.field_separator, summary.header_lines, summary.empty_fields
    );

    for warning in result.warnings.iter().flatten() {
        println!("  ⚠ {}", warning);
    }
}

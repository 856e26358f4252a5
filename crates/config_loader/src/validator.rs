//! Configuration validation
//!
//! Rules:
//! - file_name non-empty
//! - field_separator non-empty and free of line terminators
//! - header_lines within range

use contracts::{ContractError, SurveyConfig};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Validate a SurveyConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &SurveyConfig) -> Result<(), ContractError> {
    config.validate().map_err(|e| first_error("", &e))?;
    validate_separator(config)?;
    Ok(())
}

/// A separator containing a line terminator can never appear inside a line
fn validate_separator(config: &SurveyConfig) -> Result<(), ContractError> {
    let separator = &config.source.field_separator;
    if separator.contains(['\n', '\r']) {
        return Err(ContractError::config_validation(
            "source.field_separator",
            "field_separator cannot contain line terminators",
        ));
    }
    Ok(())
}

/// Flatten derive-level validation errors into the first offending field
fn first_error(prefix: &str, errors: &ValidationErrors) -> ContractError {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                let message = list
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "invalid value".to_string());
                return ContractError::config_validation(path, message);
            }
            ValidationErrorsKind::Struct(nested) => return first_error(&path, nested),
            ValidationErrorsKind::List(items) => {
                if let Some((idx, nested)) = items.iter().next() {
                    return first_error(&format!("{path}[{idx}]"), nested);
                }
            }
        }
    }
    ContractError::config_validation(prefix, "invalid configuration")
}

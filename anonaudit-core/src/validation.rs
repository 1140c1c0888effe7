//! JSON Schema validation for the report format.
//!
//! An embedded schema string compiled once into a `OnceLock<Validator>`,
//! with a typed error enum reporting compilation and validation failures
//! separately.

use std::sync::OnceLock;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::report::keys;

/// Schema validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("report JSON schema compilation failed: {message}")]
    SchemaCompilation { message: String },

    #[error("report failed schema validation: {errors:?}")]
    ValidationFailed { errors: Vec<String> },

    #[error("report is not valid JSON: {source}")]
    JsonParsing {
        #[from]
        source: serde_json::Error,
    },
}

const SCHEMA_V1: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "Anonymization audit report v1",
  "oneOf": [
    {
      "type": "object",
      "additionalProperties": false,
      "maxProperties": 0
    },
    {
      "type": "object",
      "required": [
        "Summary statistics",
        "Equivalence class statistics",
        "Privacy model verification",
        "Attacker model risks"
      ],
      "properties": {
        "Summary statistics": { "type": "object" },
        "Equivalence class statistics": { "type": "object" },
        "Privacy model verification": { "type": "object" },
        "Attacker model risks": { "type": "object" }
      }
    }
  ]
}"#;

static COMPILED_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Compiles and caches the embedded report schema. Idempotent; safe to call
/// more than once (only the first compiled instance is kept).
///
/// # Errors
/// Returns `ValidationError::SchemaCompilation` if the embedded schema fails
/// to parse or compile — a defect in this crate, not in caller input.
pub fn initialize_schema_validator() -> Result<(), ValidationError> {
    if COMPILED_SCHEMA.get().is_some() {
        return Ok(());
    }
    let schema_json: Value = serde_json::from_str(SCHEMA_V1).map_err(|e| ValidationError::SchemaCompilation {
        message: format!("failed to parse embedded schema: {e}"),
    })?;
    let compiled = jsonschema::validator_for(&schema_json)
        .map_err(|e| ValidationError::SchemaCompilation { message: format!("schema compilation error: {e}") })?;
    let _ = COMPILED_SCHEMA.set(compiled);
    Ok(())
}

/// Validates a report JSON value against the embedded schema, compiling and
/// caching it on first use.
///
/// # Errors
/// Returns `ValidationError::SchemaCompilation` if the embedded schema
/// itself fails to compile (a defect in this crate), or
/// `ValidationError::ValidationFailed` if `value` does not conform.
pub fn validate_report(value: &Value) -> Result<(), ValidationError> {
    initialize_schema_validator()?;
    let Some(validator) = COMPILED_SCHEMA.get() else {
        return Err(ValidationError::SchemaCompilation {
            message: "schema validator not initialized".to_string(),
        });
    };
    if let Err(error) = validator.validate(value) {
        return Err(ValidationError::ValidationFailed { errors: vec![error.to_string()] });
    }
    Ok(())
}

/// Parses and validates a report JSON string in one step.
///
/// # Errors
/// Returns `ValidationError::JsonParsing` if `json_str` is not valid JSON,
/// otherwise the same errors as [`validate_report`].
pub fn validate_report_str(json_str: &str) -> Result<Value, ValidationError> {
    let value: Value = serde_json::from_str(json_str)?;
    validate_report(&value)?;
    Ok(value)
}

/// The well-known top-level keys a populated (non-short-circuited) report
/// must carry, re-exported for callers that want to sanity-check a
/// partially-built value without going through the full schema. A
/// short-circuited report (bare `{}`) carries none of these and is valid
/// under `SCHEMA_V1`'s other branch.
#[must_use]
pub fn required_top_level_keys() -> [&'static str; 4] {
    [keys::SUMMARY_STATISTICS, keys::EQUIVALENCE_CLASSES, keys::PRIVACY_VERIFICATION, keys::ATTACK_RISKS]
}

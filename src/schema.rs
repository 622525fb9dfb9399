use jsonschema::validator_for;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema compile error: {0}")]
    SchemaCompile(String),
    #[error("{0}")]
    Invalid(String),
}

/// Validate a JSON instance against a JSON Schema (draft 2020-12).
/// Returns the first violation's message on failure.
pub fn validate(schema: &Value, instance: &Value) -> Result<(), SchemaValidationError> {
    let validator =
        validator_for(schema).map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;

    validator
        .validate(instance)
        .map_err(|err| SchemaValidationError::Invalid(err.to_string()))
}

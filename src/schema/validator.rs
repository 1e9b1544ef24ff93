//! Validator capability and its JSON Schema implementation
//!
//! A validator answers pass/fail for a value. It does not mutate the value
//! and does not report why a value failed; callers only branch on the
//! boolean.

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};

/// Pass/fail check of a JSON value.
pub trait Validator: Send + Sync {
    /// Returns true if `value` satisfies this validator.
    fn is_valid(&self, value: &Value) -> bool;
}

impl<F> Validator for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn is_valid(&self, value: &Value) -> bool {
        self(value)
    }
}

/// A validator backed by the `jsonschema` crate.
///
/// The draft is detected from the document's `$schema` keyword and the
/// document itself is checked against its meta-schema when compiled.
pub struct JsonSchemaValidator {
    compiled: jsonschema::Validator,
}

impl JsonSchemaValidator {
    /// Compiles a schema document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Compile` if the document is not a valid schema.
    pub fn compile(document: &Value) -> SchemaResult<Self> {
        let compiled =
            jsonschema::validator_for(document).map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self { compiled })
    }
}

impl Validator for JsonSchemaValidator {
    fn is_valid(&self, value: &Value) -> bool {
        self.compiled.is_valid(value)
    }
}

/// Returns the JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

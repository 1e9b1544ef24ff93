//! Schema gate guarding store mutations

use std::fmt;

use serde_json::Value;

use super::errors::{SchemaError, SchemaResult};
use super::validator::{json_type_name, JsonSchemaValidator, Validator};

/// A schema document paired with the validator compiled from it.
///
/// The raw document is kept so it can be written back verbatim to the
/// store's sidecar file.
pub struct SchemaGate {
    document: Value,
    validator: Box<dyn Validator>,
}

impl SchemaGate {
    /// Builds a gate from a JSON Schema document.
    ///
    /// # Errors
    ///
    /// - `SchemaError::NotAnObject` if the document is not a JSON object
    /// - `SchemaError::Compile` if it is not a valid JSON Schema
    pub fn new(document: Value) -> SchemaResult<Self> {
        ensure_object(&document)?;
        let validator = JsonSchemaValidator::compile(&document)?;
        Ok(Self {
            document,
            validator: Box::new(validator),
        })
    }

    /// Builds a gate from a document and a caller-supplied validator.
    ///
    /// The document is still required to be an object; it is not compiled.
    pub fn with_validator(document: Value, validator: impl Validator + 'static) -> SchemaResult<Self> {
        ensure_object(&document)?;
        Ok(Self {
            document,
            validator: Box::new(validator),
        })
    }

    /// Returns true if `value` satisfies the schema.
    pub fn validate(&self, value: &Value) -> bool {
        self.validator.is_valid(value)
    }

    /// Returns the raw schema document.
    pub fn document(&self) -> &Value {
        &self.document
    }
}

impl fmt::Debug for SchemaGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaGate")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

fn ensure_object(document: &Value) -> SchemaResult<()> {
    if document.is_object() {
        Ok(())
    } else {
        Err(SchemaError::NotAnObject(json_type_name(document)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gate_keeps_document_verbatim() {
        let document = json!({"type": "number", "description": "scores"});
        let gate = SchemaGate::new(document.clone()).unwrap();
        assert_eq!(gate.document(), &document);
    }

    #[test]
    fn test_gate_validates() {
        let gate = SchemaGate::new(json!({"type": "number"})).unwrap();
        assert!(gate.validate(&json!(42)));
        assert!(!gate.validate(&json!("not a number")));
    }

    #[test]
    fn test_non_object_document_rejected() {
        for document in [json!(null), json!([]), json!("number"), json!(true)] {
            let err = SchemaGate::new(document).unwrap_err();
            assert!(matches!(err, SchemaError::NotAnObject(_)));
        }
    }

    #[test]
    fn test_custom_validator() {
        let gate = SchemaGate::with_validator(json!({}), |v: &Value| v.is_string()).unwrap();
        assert!(gate.validate(&json!("ok")));
        assert!(!gate.validate(&json!(1)));
    }

    #[test]
    fn test_custom_validator_still_requires_object_document() {
        let result = SchemaGate::with_validator(json!(1), |_: &Value| true);
        assert!(result.is_err());
    }
}

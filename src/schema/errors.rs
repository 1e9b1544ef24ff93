//! Schema error types
//!
//! Error codes:
//! - JSONDB_SCHEMA_NOT_OBJECT
//! - JSONDB_SCHEMA_COMPILE_FAILED

use thiserror::Error;

/// Errors raised while constructing a [`SchemaGate`](super::SchemaGate).
///
/// Validation of a value never errors; it answers pass/fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Schema document is not a JSON object
    #[error("schema document must be an object, got {0}")]
    NotAnObject(&'static str),

    /// Schema document could not be compiled into a validator
    #[error("schema document failed to compile: {0}")]
    Compile(String),
}

impl SchemaError {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::NotAnObject(_) => "JSONDB_SCHEMA_NOT_OBJECT",
            SchemaError::Compile(_) => "JSONDB_SCHEMA_COMPILE_FAILED",
        }
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

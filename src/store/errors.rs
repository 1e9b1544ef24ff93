//! Store error types
//!
//! Every rejected operation leaves the mapping unchanged. Both the string
//! codes and the numeric status codes are stable.

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Selector key is empty, or a key is missing where the mode requires one
    #[error("Invalid key")]
    InvalidKey,

    #[error("Key already exists: {0}")]
    KeyAlreadyExists(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Schema document is malformed or not an object
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Candidate value for this key failed schema validation
    #[error("Value for key '{0}' does not match the schema")]
    SchemaMismatch(String),

    /// Predicate-based update called with a plain value
    #[error("Predicate update requires a transform function")]
    UpdateValueMustBeFunction,

    #[error("Invalid store name: {0:?}")]
    InvalidName(String),

    /// Document handed to bulk load has an unsupported shape
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::InvalidKey => "JSONDB_INVALID_KEY",
            StoreError::KeyAlreadyExists(_) => "JSONDB_KEY_ALREADY_EXISTS",
            StoreError::KeyNotFound(_) => "JSONDB_KEY_NOT_FOUND",
            StoreError::InvalidSchema(_) => "JSONDB_INVALID_SCHEMA",
            StoreError::SchemaMismatch(_) => "JSONDB_SCHEMA_MISMATCH",
            StoreError::UpdateValueMustBeFunction => "JSONDB_UPDATE_VALUE_MUST_BE_FUNCTION",
            StoreError::InvalidName(_) => "JSONDB_INVALID_NAME",
            StoreError::InvalidDocument(_) => "JSONDB_INVALID_DOCUMENT",
            StoreError::Serialization(_) => "JSONDB_SERIALIZATION",
        }
    }

    /// Returns the numeric status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::InvalidKey => 1,
            StoreError::KeyAlreadyExists(_) => 2,
            StoreError::KeyNotFound(_) => 3,
            StoreError::InvalidSchema(_) => 4,
            StoreError::SchemaMismatch(_) => 5,
            StoreError::UpdateValueMustBeFunction => 6,
            StoreError::InvalidName(_) => 50,
            StoreError::InvalidDocument(_) => 101,
            StoreError::Serialization(_) => 103,
        }
    }
}

impl From<SchemaError> for StoreError {
    fn from(e: SchemaError) -> Self {
        StoreError::InvalidSchema(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

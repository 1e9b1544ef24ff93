//! CLI-specific error types
//!
//! All CLI errors end the process. Errors for a single session request are
//! reported on stdout and the session continues.

use std::fmt;
use std::io;

use crate::persist::PersistError;
use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Session request is not valid JSON or names an unknown op
    InvalidRequest,
    /// Store could not be created, loaded or exported
    StoreFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "JSONDB_CLI_CONFIG_ERROR",
            Self::IoError => "JSONDB_CLI_IO_ERROR",
            Self::InvalidRequest => "JSONDB_CLI_INVALID_REQUEST",
            Self::StoreFailed => "JSONDB_CLI_STORE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid request
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidRequest, msg)
    }

    /// Store failed
    pub fn store_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StoreFailed, msg)
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<PersistError> for CliError {
    fn from(e: PersistError) -> Self {
        Self::store_failed(format!("{} ({})", e, e.code()))
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        PersistError::from(e).into()
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_code_then_message() {
        let err = CliError::config_error("bad level");
        assert_eq!(err.to_string(), "JSONDB_CLI_CONFIG_ERROR: bad level");
        assert_eq!(err.code_str(), CliErrorCode::ConfigError.code());
    }

    #[test]
    fn test_store_error_becomes_store_failed() {
        let err: CliError = StoreError::InvalidName("a/b".into()).into();
        assert_eq!(err.code_str(), "JSONDB_CLI_STORE_FAILED");
        assert!(err.message().contains("JSONDB_INVALID_NAME"));
    }
}

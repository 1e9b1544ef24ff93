//! Persistence error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Result type for persistence operations
pub type PersistResult<T> = Result<T, PersistError>;

/// Errors raised while loading or writing store files
#[derive(Debug, Error)]
pub enum PersistError {
    /// Path is empty, has no file name, or names a file that does not exist
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// File extension is not `.json`
    #[error("Not a JSON database file: {}", .0.display())]
    InvalidFile(PathBuf),

    /// File content is not a JSON document of the expected shape
    #[error("Invalid document '{}': {reason}", path.display())]
    InvalidDocument { path: PathBuf, reason: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PersistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PersistError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the string code for this error
    pub fn code(&self) -> &'static str {
        match self {
            PersistError::InvalidPath(_) => "JSONDB_INVALID_PATH",
            PersistError::InvalidFile(_) => "JSONDB_INVALID_FILE",
            PersistError::InvalidDocument { .. } => "JSONDB_INVALID_DOCUMENT",
            PersistError::Io { .. } => "JSONDB_IO_ERROR",
            PersistError::Store(e) => e.code(),
        }
    }

    /// Returns the numeric status code
    pub fn status_code(&self) -> u16 {
        match self {
            PersistError::InvalidFile(_) => 100,
            PersistError::InvalidDocument { .. } => 101,
            PersistError::InvalidPath(_) => 102,
            PersistError::Io { .. } => 110,
            PersistError::Store(e) => e.status_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_pass_through() {
        let err: PersistError = StoreError::KeyNotFound("k".into()).into();
        assert_eq!(err.code(), "JSONDB_KEY_NOT_FOUND");
        assert_eq!(err.status_code(), 3);
        assert_eq!(err.to_string(), "Key not found: k");
    }

    #[test]
    fn test_display_includes_path() {
        let err = PersistError::InvalidFile(PathBuf::from("data.txt"));
        assert!(err.to_string().contains("data.txt"));
        assert_eq!(err.status_code(), 100);
    }
}

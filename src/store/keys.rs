//! Storage mode and key resolution
//!
//! A map-mode store takes keys from the caller. An array-mode store
//! generates them: sequential decimal tokens, never reused for the
//! lifetime of the store, so the order of generated keys is the order of
//! insertion.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use super::Records;

/// Storage shape of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// Caller-supplied keys, serialized as a JSON object
    #[default]
    Map,
    /// Generated keys, serialized as a JSON array of values
    Array,
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreMode::Map => write!(f, "map"),
            StoreMode::Array => write!(f, "array"),
        }
    }
}

/// Turns an optional caller key into the key a record is stored under.
pub trait KeyStrategy {
    /// Resolves the key for a new record.
    ///
    /// The returned key is non-empty. Generated keys are also absent from
    /// `records`; caller keys are checked for duplicates by the store.
    fn resolve(&mut self, supplied: Option<&str>, records: &Records) -> StoreResult<String>;
}

/// Keys come from the caller and must be non-empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitKey;

impl KeyStrategy for ExplicitKey {
    fn resolve(&mut self, supplied: Option<&str>, _records: &Records) -> StoreResult<String> {
        match supplied {
            Some(key) if !key.is_empty() => Ok(key.to_string()),
            _ => Err(StoreError::InvalidKey),
        }
    }
}

/// Sequential key generator. Caller keys are ignored.
#[derive(Debug, Clone, Default)]
pub struct AutoKey {
    next: u64,
}

impl AutoKey {
    /// Creates a generator starting at `"0"`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the next token absent from `records`.
    pub(crate) fn generate(&mut self, records: &Records) -> String {
        loop {
            let candidate = self.next.to_string();
            self.next += 1;
            if !records.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

impl KeyStrategy for AutoKey {
    fn resolve(&mut self, _supplied: Option<&str>, records: &Records) -> StoreResult<String> {
        Ok(self.generate(records))
    }
}

//! Store construction options

use std::path::PathBuf;

use serde_json::Value;

use super::keys::StoreMode;

/// Options for [`Store::new`](super::Store::new).
///
/// ```ignore
/// let options = StoreOptions::new()
///     .base_path("./data")
///     .schema(json!({"type": "number"}))
///     .mode(StoreMode::Array);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Directory the store exports to (default: current directory)
    pub base_path: Option<PathBuf>,
    /// JSON Schema document gating every write
    pub schema: Option<Value>,
    /// Object or array ingested through `bulk_load` at construction
    pub seed: Option<Value>,
    pub mode: StoreMode,
}

impl StoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    pub fn schema(mut self, document: Value) -> Self {
        self.schema = Some(document);
        self
    }

    pub fn seed(mut self, document: Value) -> Self {
        self.seed = Some(document);
        self
    }

    pub fn mode(mut self, mode: StoreMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `mode(StoreMode::Array)`.
    pub fn array(self) -> Self {
        self.mode(StoreMode::Array)
    }
}

//! jsondb - a schema-checked JSON record store
//!
//! Records live in memory, keyed by string, and are exported to
//! `<base_path>/<name>.json`. An optional JSON Schema gates every write.

pub mod cli;
pub mod observability;
pub mod persist;
pub mod schema;
pub mod store;

pub use persist::{load_from_file, PersistError, PersistResult};
pub use schema::{SchemaError, SchemaGate};
pub use store::{
    Records, Replacement, Selection, Selector, SharedStore, Store, StoreError, StoreEvent,
    StoreMode, StoreOptions, StoreResult, UpdateOutcome, UpdateReport,
};

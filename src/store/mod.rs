//! Record store for jsondb
//!
//! A [`Store`] maps string keys to JSON values. Records are addressed by a
//! [`Selector`]: an exact key, or a predicate over values.
//!
//! # Modes
//!
//! - [`StoreMode::Map`]: the caller supplies keys; serializes to an object.
//! - [`StoreMode::Array`]: keys are generated; serializes to an array of
//!   values in insertion order.
//!
//! # Writes
//!
//! With a schema attached, `create`, `update` and `bulk_load` validate
//! every value before it is stored. A rejected single-record write changes
//! nothing. A predicate update validates each matched record on its own
//! and skips the ones that fail.
//!
//! # Concurrency
//!
//! Mutations take `&mut Store`. [`SharedStore`] wraps a store in a
//! `RwLock` for callers on several threads.

mod errors;
mod events;
mod keys;
mod options;
mod outcome;
mod selector;
mod shared;
#[allow(clippy::module_inception)]
mod store;

pub use errors::{StoreError, StoreResult};
pub use events::{EventKind, StoreEvent, SubscriptionId};
pub use keys::{AutoKey, ExplicitKey, KeyStrategy, StoreMode};
pub use options::StoreOptions;
pub use outcome::{Selection, UpdateEntry, UpdateOutcome, UpdateReport};
pub use selector::{Predicate, Replacement, Selector, Transform};
pub use shared::SharedStore;
pub use store::{to_json_string, Store};

/// Insertion-ordered key→value records
pub type Records = serde_json::Map<String, serde_json::Value>;

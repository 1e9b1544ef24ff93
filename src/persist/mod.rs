//! File persistence for jsondb
//!
//! On-disk layout, per store:
//! - `<base_path>/<name>.json`: object (map mode) or array (array mode)
//! - `<base_path>/<name>.schema.json`: optional schema, stored verbatim
//!
//! This module only talks to a store through `Store::serialize`, the
//! constructor and `Store::bulk_load`.

mod errors;
mod loader;
mod writer;

pub use errors::{PersistError, PersistResult};
pub use loader::{load_document, load_from_file};
pub use writer::{clear, export, export_schema, write_document};

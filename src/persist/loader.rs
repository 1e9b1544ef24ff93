//! Loading documents and rehydrating stores from disk

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::observability::{log_event, Event};
use crate::schema::json_type_name;
use crate::store::{Store, StoreMode, StoreOptions};

use super::errors::{PersistError, PersistResult};

/// Reads and parses a JSON document.
///
/// # Errors
///
/// - `Io` if the file cannot be read
/// - `InvalidDocument` if it is not valid JSON
pub fn load_document(path: &Path) -> PersistResult<Value> {
    let content = fs::read_to_string(path).map_err(|e| PersistError::io(path, e))?;

    let document = serde_json::from_str(&content).map_err(|e| PersistError::InvalidDocument {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log_event(
        Event::DocumentLoaded,
        &[("path", &path.display().to_string())],
    );

    Ok(document)
}

/// Rehydrates a store from `<dir>/<name>.json`.
///
/// A missing extension is completed to `.json`. The store is named after
/// the file stem and exports back to the file's directory. An array
/// document opens an array-mode store, an object a map-mode store.
///
/// Without `schema_path`, `<dir>/<name>.schema.json` is used if it can be
/// read and parsed; otherwise the store opens without a schema. An explicit
/// `schema_path` must exist and parse.
///
/// # Errors
///
/// - `InvalidPath` if the path has no file name or the data file does not exist
/// - `InvalidFile` if the extension is not `.json`
/// - `Io` / `InvalidDocument` for an unreadable data file or explicit schema
/// - `Store` for any construction or ingestion failure
pub fn load_from_file(path: impl AsRef<Path>, schema_path: Option<&Path>) -> PersistResult<Store> {
    let dest = resolve_data_path(path.as_ref())?;
    if !dest.is_file() {
        return Err(PersistError::InvalidPath(dest));
    }

    let name = dest
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| PersistError::InvalidPath(dest.clone()))?
        .to_string();
    let base_path = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let schema = match schema_path {
        Some(explicit) => Some(load_document(explicit)?),
        None => load_default_schema(&base_path.join(format!("{name}.schema.json"))),
    };

    let data = load_document(&dest)?;
    let mode = match &data {
        Value::Array(_) => StoreMode::Array,
        Value::Object(_) => StoreMode::Map,
        other => {
            return Err(PersistError::InvalidDocument {
                path: dest,
                reason: format!("expected an object or an array, got {}", json_type_name(other)),
            })
        }
    };

    let mut options = StoreOptions::new().base_path(base_path).seed(data).mode(mode);
    if let Some(document) = schema {
        options = options.schema(document);
    }

    Ok(Store::new(name, options)?)
}

/// Completes a bare path to `.json` and rejects any other extension.
fn resolve_data_path(path: &Path) -> PersistResult<PathBuf> {
    if path.file_name().is_none() {
        return Err(PersistError::InvalidPath(path.to_path_buf()));
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        None => Ok(path.with_extension("json")),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(path.to_path_buf()),
        Some(_) => Err(PersistError::InvalidFile(path.to_path_buf())),
    }
}

fn load_default_schema(path: &Path) -> Option<Value> {
    match load_document(path) {
        Ok(document) => Some(document),
        Err(e) => {
            log_event(
                Event::SchemaSidecarSkipped,
                &[
                    ("path", &path.display().to_string()),
                    ("code", e.code()),
                ],
            );
            None
        }
    }
}

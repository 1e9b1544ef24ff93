//! Writing store files
//!
//! Exports are whole-file rewrites: the last export wins.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::observability::{log_event, Event};
use crate::store::{to_json_string, Store};

use super::errors::{PersistError, PersistResult};

/// Writes a document as JSON text, pretty-printed with four-space indents
/// when `pretty` is set.
pub fn write_document(path: &Path, document: &Value, pretty: bool) -> PersistResult<()> {
    let content = to_json_string(document, pretty)?;
    fs::write(path, content).map_err(|e| PersistError::io(path, e))
}

/// Writes the store's serialized form to `<base_path>/<name>.json`.
///
/// The directory must already exist.
pub fn export(store: &Store, pretty: bool) -> PersistResult<PathBuf> {
    let path = store.full_file_path();
    write_document(&path, &store.serialize(), pretty)?;

    log_event(
        Event::ExportComplete,
        &[
            ("store", store.name()),
            ("path", &path.display().to_string()),
            ("records", &store.len().to_string()),
        ],
    );

    Ok(path)
}

/// Writes the store's schema document to `<base_path>/<name>.schema.json`.
///
/// Returns `None` when the store has no schema.
pub fn export_schema(store: &Store) -> PersistResult<Option<PathBuf>> {
    let Some(gate) = store.schema() else {
        return Ok(None);
    };

    let path = store.schema_file_path();
    write_document(&path, gate.document(), true)?;

    log_event(
        Event::SchemaExported,
        &[("store", store.name()), ("path", &path.display().to_string())],
    );

    Ok(Some(path))
}

/// Deletes the store's data file, or truncates it to empty when
/// `delete_file` is false. The in-memory records are untouched.
///
/// # Errors
///
/// Returns `Io` if the file does not exist or cannot be modified.
pub fn clear(store: &Store, delete_file: bool) -> PersistResult<()> {
    let path = store.full_file_path();

    if delete_file {
        fs::remove_file(&path).map_err(|e| PersistError::io(&path, e))?;
    } else {
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| PersistError::io(&path, e))?;
    }

    log_event(
        Event::StoreCleared,
        &[
            ("store", store.name()),
            ("deleted", if delete_file { "true" } else { "false" }),
        ],
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreOptions;
    use serde_json::json;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> Store {
        let mut store = Store::new("test", StoreOptions::new().base_path(dir.path())).unwrap();
        for n in 1..=4 {
            store
                .create(json!(format!("testValue{n}")), Some(&format!("testKey{n}")))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_export_writes_compact_json() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let path = export(&store, false).unwrap();
        assert_eq!(path, dir.path().join("test.json"));

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains('\n'));
        let parsed: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["testKey3"], "testValue3");
    }

    #[test]
    fn test_export_pretty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let path = export(&store, true).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("{\n    \"testKey1\""));
    }

    #[test]
    fn test_export_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(
            "test",
            StoreOptions::new().base_path(dir.path().join("directory-that-doesnt-exist")),
        )
        .unwrap();

        assert!(matches!(export(&store, false), Err(PersistError::Io { .. })));
    }

    #[test]
    fn test_export_schema_verbatim() {
        let dir = TempDir::new().unwrap();
        let schema = json!({"type": "object", "required": ["name"]});
        let store = Store::new(
            "people",
            StoreOptions::new().base_path(dir.path()).schema(schema.clone()),
        )
        .unwrap();

        let path = export_schema(&store).unwrap().unwrap();
        let written: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written, schema);

        let plain = store_in(&dir);
        assert!(export_schema(&plain).unwrap().is_none());
    }

    #[test]
    fn test_clear_truncates_then_deletes() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let path = export(&store, false).unwrap();

        clear(&store, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        clear(&store, true).unwrap();
        assert!(!path.exists());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_clear_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(clear(&store, true).is_err());
        assert!(clear(&store, false).is_err());
    }
}

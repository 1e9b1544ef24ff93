//! The record store
//!
//! Owns the key→value mapping. Every mutation follows the same order:
//! resolve the key, check existence, check the schema gate, write, then
//! notify observers. Nothing is written before every check has passed.

use std::collections::HashSet;
use std::env;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::observability::{log_event, Event};
use crate::schema::{json_type_name, SchemaGate};

use super::errors::{StoreError, StoreResult};
use super::events::{EventKind, Observers, StoreEvent, SubscriptionId};
use super::keys::{AutoKey, ExplicitKey, KeyStrategy, StoreMode};
use super::options::StoreOptions;
use super::outcome::{Selection, UpdateOutcome, UpdateReport};
use super::selector::{Replacement, Selector};
use super::Records;

/// An in-memory JSON record store.
#[derive(Debug)]
pub struct Store {
    name: String,
    base_path: PathBuf,
    mode: StoreMode,
    schema: Option<SchemaGate>,
    records: Records,
    auto_keys: AutoKey,
    observers: Observers,
}

impl Store {
    /// Creates a store, ingesting `options.seed` if given.
    ///
    /// # Errors
    ///
    /// - `InvalidName` if `name` is empty or contains a path separator
    /// - `InvalidSchema` if the schema document is not an object or does not compile
    /// - any `bulk_load` error for the seed data
    pub fn new(name: impl Into<String>, options: StoreOptions) -> StoreResult<Self> {
        let name = name.into();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(StoreError::InvalidName(name));
        }

        let base_path = resolve_base_path(
            options
                .base_path
                .as_deref()
                .unwrap_or_else(|| Path::new(".")),
        );
        let schema = options.schema.map(SchemaGate::new).transpose()?;

        let mut store = Self {
            name,
            base_path,
            mode: options.mode,
            schema,
            records: Records::new(),
            auto_keys: AutoKey::new(),
            observers: Observers::default(),
        };

        if let Some(seed) = options.seed {
            store.bulk_load(seed)?;
        }

        log_event(
            Event::StoreOpened,
            &[
                ("store", &store.name),
                ("mode", &store.mode.to_string()),
                ("records", &store.records.len().to_string()),
                ("schema", if store.schema.is_some() { "true" } else { "false" }),
            ],
        );

        Ok(store)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute directory the store exports to
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn mode(&self) -> StoreMode {
        self.mode
    }

    pub fn schema(&self) -> Option<&SchemaGate> {
        self.schema.as_ref()
    }

    /// `<base_path>/<name>.json`
    pub fn full_file_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", self.name))
    }

    /// `<base_path>/<name>.schema.json`
    pub fn schema_file_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.schema.json", self.name))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Every record with its key, in insertion order, regardless of mode
    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Registers an observer for create/update/delete notifications.
    pub fn subscribe(
        &mut self,
        observer: impl Fn(&StoreEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Removes an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Inserts a record and returns the inserted value.
    ///
    /// In map mode `key` is required. In array mode it is ignored and the
    /// next unused sequential key is generated.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if map mode and `key` is absent or empty
    /// - `KeyAlreadyExists` if the key is present
    /// - `SchemaMismatch` if the schema rejects `value`
    pub fn create(&mut self, value: Value, key: Option<&str>) -> StoreResult<Value> {
        self.create_entry(value, key).map(|(_, value)| value)
    }

    /// `create`, also returning the key the record was stored under.
    pub fn create_entry(
        &mut self,
        value: Value,
        key: Option<&str>,
    ) -> StoreResult<(String, Value)> {
        let checkpoint = self.auto_keys.clone();
        let admitted = self
            .resolve_key(key)
            .and_then(|key| self.admit(&key, &value).map(|()| key));

        let key = match admitted {
            Ok(key) => key,
            Err(e) => {
                self.auto_keys = checkpoint;
                return Err(self.rejected("create", e));
            }
        };

        self.records.insert(key.clone(), value.clone());
        log_event(Event::RecordCreated, &[("store", &self.name), ("key", &key)]);
        self.observers.emit(EventKind::Create, &self.name, vec![key.clone()]);

        Ok((key, value))
    }

    /// Reads one record by key, or every record a predicate accepts.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if the key is empty
    /// - `KeyNotFound` if the key is absent
    pub fn read<'a>(&self, selector: impl Into<Selector<'a>>) -> StoreResult<Selection> {
        match selector.into() {
            Selector::Key(key) => self.lookup(&key).cloned().map(Selection::Single),
            Selector::Match(predicate) => {
                let matches = self
                    .records
                    .iter()
                    .filter(|&(_, value)| predicate(value))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                Ok(Selection::Matches(matches))
            }
        }
    }

    /// Replaces one record by key, or transforms every record a predicate accepts.
    ///
    /// An exact-key update returns the stored replacement. A predicate update
    /// validates each candidate independently, skips the ones the schema
    /// rejects, and reports before/after per matched key.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` / `KeyNotFound` for an exact key
    /// - `SchemaMismatch` if an exact-key candidate fails the schema
    /// - `UpdateValueMustBeFunction` if a predicate update is given a plain value
    pub fn update<'a, 'b>(
        &mut self,
        selector: impl Into<Selector<'a>>,
        replacement: impl Into<Replacement<'b>>,
    ) -> StoreResult<UpdateOutcome> {
        let replacement = replacement.into();

        match selector.into() {
            Selector::Key(key) => {
                let candidate = match self.lookup(&key) {
                    Ok(current) => replacement.candidate(current),
                    Err(e) => return Err(self.rejected("update", e)),
                };
                if !self.admits(&candidate) {
                    return Err(self.rejected("update", StoreError::SchemaMismatch(key)));
                }

                self.records.insert(key.clone(), candidate.clone());
                log_event(Event::RecordUpdated, &[("store", &self.name), ("key", &key)]);
                self.observers.emit(EventKind::Update, &self.name, vec![key]);

                Ok(UpdateOutcome::Replaced(candidate))
            }
            Selector::Match(predicate) => {
                if !replacement.is_transform() {
                    return Err(self.rejected("update", StoreError::UpdateValueMustBeFunction));
                }

                let matched = self.matching_keys(predicate.as_ref());
                let mut report = UpdateReport::default();

                for key in matched {
                    let Some(before) = self.records.get(&key).cloned() else {
                        continue;
                    };
                    let candidate = replacement.candidate(&before);
                    if self.admits(&candidate) {
                        self.records.insert(key.clone(), candidate.clone());
                        report.push(key, before, Some(candidate));
                    } else {
                        report.push(key, before, None);
                    }
                }

                let applied: Vec<String> =
                    report.applied_keys().into_iter().map(String::from).collect();
                log_event(
                    Event::RecordUpdated,
                    &[
                        ("store", &self.name),
                        ("matched", &report.len().to_string()),
                        ("applied", &applied.len().to_string()),
                    ],
                );
                self.observers.emit(EventKind::Update, &self.name, applied);

                Ok(UpdateOutcome::Report(report))
            }
        }
    }

    /// Removes one record by key, or every record a predicate accepts,
    /// returning the removed records.
    ///
    /// # Errors
    ///
    /// - `InvalidKey` if the key is empty
    /// - `KeyNotFound` if the key is absent
    pub fn delete<'a>(&mut self, selector: impl Into<Selector<'a>>) -> StoreResult<Records> {
        let removed = match selector.into() {
            Selector::Key(key) => {
                if let Err(e) = self.lookup(&key) {
                    return Err(self.rejected("delete", e));
                }
                let mut removed = Records::new();
                if let Some(value) = self.records.shift_remove(&key) {
                    removed.insert(key, value);
                }
                removed
            }
            Selector::Match(predicate) => {
                let matched: HashSet<String> = self.matching_keys(predicate.as_ref()).into_iter().collect();
                let (removed, kept): (Records, Records) = std::mem::take(&mut self.records)
                    .into_iter()
                    .partition(|(key, _)| matched.contains(key));
                self.records = kept;
                removed
            }
        };

        log_event(
            Event::RecordDeleted,
            &[("store", &self.name), ("removed", &removed.len().to_string())],
        );
        self.observers
            .emit(EventKind::Delete, &self.name, removed.keys().cloned().collect());

        Ok(removed)
    }

    /// Projection of the store into its persisted shape.
    ///
    /// Map mode yields the mapping as an object. Array mode yields the values
    /// in insertion order, leaving out any value the schema rejects.
    pub fn serialize(&self) -> Value {
        match self.mode {
            StoreMode::Map => Value::Object(self.records.clone()),
            StoreMode::Array => Value::Array(
                self.records
                    .values()
                    .filter(|&value| self.admits(value))
                    .cloned()
                    .collect(),
            ),
        }
    }

    /// `serialize` rendered as JSON text.
    pub fn to_json(&self, pretty: bool) -> StoreResult<String> {
        to_json_string(&self.serialize(), pretty)
    }

    /// Ingests an object (one record per entry, keyed by entry key) or an
    /// array (one record per element, generated keys).
    ///
    /// Every record is checked against the key rules and the schema before
    /// anything is inserted; the first failure rejects the whole load and
    /// leaves the store unchanged. Returns the number of records inserted.
    ///
    /// # Errors
    ///
    /// - `InvalidDocument` if the document is neither an object nor an array
    /// - `InvalidKey`, `KeyAlreadyExists`, `SchemaMismatch` for the first bad record
    pub fn bulk_load(&mut self, document: Value) -> StoreResult<usize> {
        let mut keys = self.auto_keys.clone();

        let staged: Vec<(String, Value)> = match document {
            Value::Object(entries) => entries.into_iter().collect(),
            Value::Array(items) => items
                .into_iter()
                .map(|value| (keys.generate(&self.records), value))
                .collect(),
            other => {
                let e = StoreError::InvalidDocument(format!(
                    "expected an object or an array, got {}",
                    json_type_name(&other)
                ));
                return Err(self.bulk_rejected(e));
            }
        };

        let mut seen = HashSet::with_capacity(staged.len());
        for (key, value) in &staged {
            let check = if key.is_empty() {
                Err(StoreError::InvalidKey)
            } else if !seen.insert(key.as_str()) {
                Err(StoreError::KeyAlreadyExists(key.clone()))
            } else {
                self.admit(key, value)
            };
            if let Err(e) = check {
                return Err(self.bulk_rejected(e));
            }
        }

        self.auto_keys = keys;
        let count = staged.len();
        for (key, value) in staged {
            self.records.insert(key.clone(), value);
            self.observers.emit(EventKind::Create, &self.name, vec![key]);
        }

        log_event(
            Event::BulkLoadComplete,
            &[("store", &self.name), ("records", &count.to_string())],
        );

        Ok(count)
    }

    fn resolve_key(&mut self, supplied: Option<&str>) -> StoreResult<String> {
        match self.mode {
            StoreMode::Map => ExplicitKey.resolve(supplied, &self.records),
            StoreMode::Array => self.auto_keys.resolve(supplied, &self.records),
        }
    }

    /// Checks a new record against key uniqueness and the schema.
    fn admit(&self, key: &str, value: &Value) -> StoreResult<()> {
        if self.records.contains_key(key) {
            return Err(StoreError::KeyAlreadyExists(key.to_string()));
        }
        if !self.admits(value) {
            return Err(StoreError::SchemaMismatch(key.to_string()));
        }
        Ok(())
    }

    fn admits(&self, value: &Value) -> bool {
        self.schema.as_ref().map_or(true, |gate| gate.validate(value))
    }

    fn lookup(&self, key: &str) -> StoreResult<&Value> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey);
        }
        self.records
            .get(key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))
    }

    fn matching_keys(&self, predicate: &dyn Fn(&Value) -> bool) -> Vec<String> {
        self.records
            .iter()
            .filter(|&(_, value)| predicate(value))
            .map(|(key, _)| key.clone())
            .collect()
    }

    fn rejected(&self, operation: &str, e: StoreError) -> StoreError {
        log_event(
            Event::MutationRejected,
            &[
                ("store", &self.name),
                ("operation", operation),
                ("code", e.code()),
            ],
        );
        e
    }

    fn bulk_rejected(&self, e: StoreError) -> StoreError {
        log_event(
            Event::BulkLoadRejected,
            &[("store", &self.name), ("code", e.code())],
        );
        e
    }
}

/// Renders a document as JSON text, pretty-printed with four-space indents.
pub fn to_json_string(document: &Value, pretty: bool) -> StoreResult<String> {
    if !pretty {
        return Ok(serde_json::to_string(document)?);
    }

    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Makes `path` absolute against the current directory and drops `.` components.
fn resolve_base_path(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    joined
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

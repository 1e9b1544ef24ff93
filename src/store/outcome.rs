//! Results of read and update calls

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::Records;

/// Result of `read`
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Value stored under an exact key
    Single(Value),
    /// Records accepted by a predicate, in insertion order; may be empty
    Matches(Records),
}

impl Selection {
    /// Returns the value of an exact-key read.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Selection::Single(value) => Some(value),
            Selection::Matches(_) => None,
        }
    }

    /// Returns the records of a predicate read.
    pub fn into_records(self) -> Option<Records> {
        match self {
            Selection::Single(_) => None,
            Selection::Matches(records) => Some(records),
        }
    }

    /// Number of values selected.
    pub fn len(&self) -> usize {
        match self {
            Selection::Single(_) => 1,
            Selection::Matches(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-record result of a predicate update
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct UpdateEntry {
    /// Value before the update
    pub before: Value,
    /// Stored replacement, or `None` when the schema rejected the candidate
    pub after: Option<Value>,
}

impl UpdateEntry {
    /// Returns true if the replacement was stored.
    pub fn applied(&self) -> bool {
        self.after.is_some()
    }
}

/// Report of a predicate update, keyed by matched record key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    entries: Vec<(String, UpdateEntry)>,
}

impl Serialize for UpdateReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

impl UpdateReport {
    pub(crate) fn push(&mut self, key: String, before: Value, after: Option<Value>) {
        self.entries.push((key, UpdateEntry { before, after }));
    }

    /// Entry for `key`, if it matched.
    pub fn get(&self, key: &str) -> Option<&UpdateEntry> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, entry)| entry)
    }

    /// Matched entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UpdateEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Keys whose replacement was stored.
    pub fn applied_keys(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, entry)| entry.applied())
            .map(|(key, _)| key)
            .collect()
    }

    /// Keys left unmodified because the schema rejected the candidate.
    pub fn skipped_keys(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, entry)| !entry.applied())
            .map(|(key, _)| key)
            .collect()
    }

    /// Number of matched records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of `update`
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Exact-key update: the stored replacement
    Replaced(Value),
    /// Predicate update: what happened to each matched record
    Report(UpdateReport),
}

impl UpdateOutcome {
    pub fn into_value(self) -> Option<Value> {
        match self {
            UpdateOutcome::Replaced(value) => Some(value),
            UpdateOutcome::Report(_) => None,
        }
    }

    pub fn into_report(self) -> Option<UpdateReport> {
        match self {
            UpdateOutcome::Replaced(_) => None,
            UpdateOutcome::Report(report) => Some(report),
        }
    }
}

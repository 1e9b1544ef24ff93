//! Observable events for jsondb
//!
//! Every line the logger writes names one of these events.

use std::fmt;

/// Observable events in jsondb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Store lifecycle
    /// Store constructed and ready for CRUD calls
    StoreOpened,
    /// Seed or imported data ingested through bulk load
    BulkLoadComplete,
    /// Bulk load rejected before any record was inserted
    BulkLoadRejected,

    // Record mutations
    /// Record inserted
    RecordCreated,
    /// One or more records replaced
    RecordUpdated,
    /// One or more records removed
    RecordDeleted,
    /// Mutation rejected by key rules or the schema gate
    MutationRejected,

    // Persistence
    /// Document parsed from disk
    DocumentLoaded,
    /// Default schema sidecar absent or unreadable, store opened without schema
    SchemaSidecarSkipped,
    /// Data file written
    ExportComplete,
    /// Schema sidecar written
    SchemaExported,
    /// Data file deleted or truncated
    StoreCleared,

    // CLI
    /// Configuration loaded
    ConfigLoaded,
    /// Command session started
    SessionStart,
    /// Command session ended
    SessionEnd,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::StoreOpened => "STORE_OPENED",
            Event::BulkLoadComplete => "BULK_LOAD_COMPLETE",
            Event::BulkLoadRejected => "BULK_LOAD_REJECTED",

            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordDeleted => "RECORD_DELETED",
            Event::MutationRejected => "MUTATION_REJECTED",

            Event::DocumentLoaded => "DOCUMENT_LOADED",
            Event::SchemaSidecarSkipped => "SCHEMA_SIDECAR_SKIPPED",
            Event::ExportComplete => "EXPORT_COMPLETE",
            Event::SchemaExported => "SCHEMA_EXPORTED",
            Event::StoreCleared => "STORE_CLEARED",

            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SessionStart => "SESSION_START",
            Event::SessionEnd => "SESSION_END",
        }
    }

    /// Returns true for per-record events that are only interesting at trace level
    pub fn is_hot_path(&self) -> bool {
        matches!(
            self,
            Event::RecordCreated | Event::RecordUpdated | Event::RecordDeleted
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            Event::StoreOpened,
            Event::BulkLoadComplete,
            Event::BulkLoadRejected,
            Event::RecordCreated,
            Event::RecordUpdated,
            Event::RecordDeleted,
            Event::MutationRejected,
            Event::DocumentLoaded,
            Event::SchemaSidecarSkipped,
            Event::ExportComplete,
            Event::SchemaExported,
            Event::StoreCleared,
            Event::ConfigLoaded,
            Event::SessionStart,
            Event::SessionEnd,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_hot_path_events() {
        assert!(Event::RecordCreated.is_hot_path());
        assert!(Event::RecordDeleted.is_hot_path());
        assert!(!Event::StoreOpened.is_hot_path());
        assert!(!Event::MutationRejected.is_hot_path());
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::StoreOpened), "STORE_OPENED");
        assert_eq!(format!("{}", Event::ExportComplete), "EXPORT_COMPLETE");
    }
}

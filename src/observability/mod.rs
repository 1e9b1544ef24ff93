//! Observability for jsondb
//!
//! Structured JSON logging of store lifecycle, mutation and persistence
//! events. Logging is read-only: it never changes the outcome of the
//! operation it describes.

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at its default severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_hot_path() {
        Severity::Trace
    } else {
        match event {
            Event::MutationRejected | Event::BulkLoadRejected | Event::SchemaSidecarSkipped => {
                Severity::Warn
            }
            _ => Severity::Info,
        }
    };
    Logger::log(severity, event.as_str(), fields);
}

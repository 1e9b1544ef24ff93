//! Change notifications
//!
//! Each store owns its observer registry. Notifications are fire-and-forget:
//! observers cannot veto or alter the operation that triggered them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Record inserted
    Create,
    /// Records replaced
    Update,
    /// Records removed
    Delete,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Create => write!(f, "create"),
            EventKind::Update => write!(f, "update"),
            EventKind::Delete => write!(f, "delete"),
        }
    }
}

/// Notification delivered to observers after a successful mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEvent {
    /// Monotonically increasing per store, starting at 1
    pub sequence: u64,

    pub kind: EventKind,

    /// Name of the store that changed
    pub store: String,

    /// Keys touched by the operation, in insertion order
    pub keys: Vec<String>,

    pub timestamp: DateTime<Utc>,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// Per-store observer registry
#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
    sequence: u64,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    /// Builds the next event and hands it to every observer in subscription order.
    pub(crate) fn emit(&mut self, kind: EventKind, store: &str, keys: Vec<String>) {
        self.sequence += 1;
        if self.observers.is_empty() {
            return;
        }

        let event = StoreEvent {
            sequence: self.sequence,
            kind,
            store: store.to_string(),
            keys,
            timestamp: Utc::now(),
        };

        for (_, observer) in &self.observers {
            observer(&event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.observers.len())
            .field("sequence", &self.sequence)
            .finish()
    }
}

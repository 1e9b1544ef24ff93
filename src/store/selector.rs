//! Record addressing: exact key or predicate

use std::fmt;

use serde_json::Value;

/// Predicate over a stored value.
pub type Predicate<'a> = Box<dyn Fn(&Value) -> bool + 'a>;

/// Transform producing the replacement for a stored value.
pub type Transform<'a> = Box<dyn Fn(Value) -> Value + 'a>;

/// Addresses one record by key, or every record a predicate accepts.
///
/// Predicates see stored values by shared reference, so they cannot change
/// stored state.
pub enum Selector<'a> {
    /// Exactly one record
    Key(String),
    /// Every record for which the predicate returns true
    Match(Predicate<'a>),
}

impl<'a> Selector<'a> {
    /// Selects the record stored under `key`.
    pub fn key(key: impl Into<String>) -> Self {
        Selector::Key(key.into())
    }

    /// Selects every record whose value satisfies `predicate`.
    pub fn matching(predicate: impl Fn(&Value) -> bool + 'a) -> Self {
        Selector::Match(Box::new(predicate))
    }
}

impl From<&str> for Selector<'_> {
    fn from(key: &str) -> Self {
        Selector::Key(key.to_string())
    }
}

impl From<String> for Selector<'_> {
    fn from(key: String) -> Self {
        Selector::Key(key)
    }
}

impl fmt::Debug for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Selector::Match(_) => f.write_str("Match(<predicate>)"),
        }
    }
}

/// New content for `update`: a value, or a function of the current value.
pub enum Replacement<'a> {
    /// Replace with this value
    Value(Value),
    /// Replace with the result of applying this to a copy of the current value
    Transform(Transform<'a>),
}

impl<'a> Replacement<'a> {
    /// Replacement computed from the current value.
    pub fn with(transform: impl Fn(Value) -> Value + 'a) -> Self {
        Replacement::Transform(Box::new(transform))
    }

    /// Produces the candidate value for a record currently holding `current`.
    pub(crate) fn candidate(&self, current: &Value) -> Value {
        match self {
            Replacement::Value(value) => value.clone(),
            Replacement::Transform(transform) => transform(current.clone()),
        }
    }

    pub(crate) fn is_transform(&self) -> bool {
        matches!(self, Replacement::Transform(_))
    }
}

impl From<Value> for Replacement<'_> {
    fn from(value: Value) -> Self {
        Replacement::Value(value)
    }
}

impl fmt::Debug for Replacement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Replacement::Transform(_) => f.write_str("Transform(<fn>)"),
        }
    }
}

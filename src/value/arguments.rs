use super::RemoteValue;
use chrono::{DateTime, Utc};

/// The resolved, positional argument list handed to a target method.
///
/// Positions follow the descriptor's `accepts` order. A `None` slot is the
/// missing marker: the argument was not supplied at all, which is distinct
/// from any falsy value (`0`, `false`, `""`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    names: Vec<String>,
    values: Vec<Option<RemoteValue>>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: Option<RemoteValue>) {
        self.names.push(name.into());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RemoteValue> {
        self.values.get(index).and_then(Option::as_ref)
    }

    pub fn get_named(&self, name: &str) -> Option<&RemoteValue> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|index| self.get(index))
    }

    /// `true` when the slot exists but was not supplied, or the index is out of range.
    pub fn is_missing(&self, index: usize) -> bool {
        self.get(index).is_none()
    }

    pub fn number(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(RemoteValue::as_f64)
    }

    pub fn string(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(RemoteValue::as_str)
    }

    pub fn boolean(&self, index: usize) -> Option<bool> {
        self.get(index).and_then(RemoteValue::as_bool)
    }

    pub fn date(&self, index: usize) -> Option<&DateTime<Utc>> {
        self.get(index).and_then(RemoteValue::as_date)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn into_values(self) -> Vec<Option<RemoteValue>> {
        self.values
    }
}

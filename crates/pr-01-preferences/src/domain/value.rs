//! # Preference Values
//!
//! The scalar and list shapes a preferences store can hold.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of every key in a store, ordered for stable file output.
pub type PreferenceMap = BTreeMap<String, PrefValue>;

/// A single stored preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    TextList(Vec<String>),
}

impl PrefValue {
    /// Size counted against `max_value_len`.
    pub fn byte_len(&self) -> usize {
        match self {
            PrefValue::Bool(_) => 1,
            PrefValue::Int(_) | PrefValue::Float(_) => 8,
            PrefValue::Text(s) => s.len(),
            PrefValue::TextList(items) => items.iter().map(String::len).sum(),
        }
    }

    /// Borrow the text if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PrefValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrefValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        PrefValue::Int(value)
    }
}

impl From<i32> for PrefValue {
    fn from(value: i32) -> Self {
        PrefValue::Int(i64::from(value))
    }
}

impl From<f64> for PrefValue {
    fn from(value: f64) -> Self {
        PrefValue::Float(value)
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        PrefValue::Text(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        PrefValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for PrefValue {
    fn from(value: Vec<String>) -> Self {
        PrefValue::TextList(value)
    }
}

//! Stored records with free-form metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record exposed by the record store: an appointment, a staff member,
/// a service, or any other entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub entity_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

/// An `{ value, label }` association as stored in record metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub id: String,
    pub label: String,
}

impl Record {
    #[must_use]
    pub fn new(id: i64, entity_type: impl Into<String>) -> Self {
        Self {
            id,
            entity_type: entity_type.into(),
            title: String::new(),
            status: String::new(),
            meta: Map::new(),
        }
    }

    /// Look up a metadata value by key.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    /// Read an `{ value, label }` object stored under `key`.
    #[must_use]
    pub fn association(&self, key: &str) -> Option<Association> {
        Association::from_value(self.meta(key)?)
    }

    /// Read the first `{ value, label }` object of a list stored under `key`.
    #[must_use]
    pub fn first_association(&self, key: &str) -> Option<Association> {
        Association::from_value(self.meta(key)?.as_array()?.first()?)
    }

    /// Read a string field of an object stored under `key`.
    #[must_use]
    pub fn meta_label(&self, key: &str) -> Option<String> {
        self.meta(key)?
            .get("label")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl Association {
    fn from_value(value: &Value) -> Option<Self> {
        let id = id_string(value.get("value")?)?;
        let label = value
            .get("label")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some(Self { id, label })
    }
}

/// Normalize a JSON identifier (number or non-empty string) to a string.
#[must_use]
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    }
}

/// Whether a list entry counts as present (non-null, non-empty, non-false).
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty() && text != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Number(number) => number.as_f64() != Some(0.0),
    }
}

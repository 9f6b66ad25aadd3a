//! Decoded serialized values

use serde_json::Value;

/// A decoded serialized value.
///
/// Arrays keep their keys in encounter order; keys are always stringified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializedValue {
    Array(Vec<(String, SerializedValue)>),
    String(String),
    Int(i64),
}

impl SerializedValue {
    /// Look up an array entry by key.
    pub fn get(&self, key: &str) -> Option<&SerializedValue> {
        match self {
            SerializedValue::Array(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SerializedValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SerializedValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Stringified form used when the value appears in key position.
    pub(crate) fn into_key(self) -> Option<String> {
        match self {
            SerializedValue::String(s) => Some(s),
            SerializedValue::Int(i) => Some(i.to_string()),
            SerializedValue::Array(_) => None,
        }
    }

    /// Insert an entry into an array value; a repeated key replaces the
    /// earlier value in place.
    pub(crate) fn push_entry(entries: &mut Vec<(String, SerializedValue)>, key: String, value: Self) {
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => entries.push((key, value)),
        }
    }

    pub fn into_json(self) -> Value {
        Value::from(self)
    }
}

impl From<SerializedValue> for Value {
    fn from(value: SerializedValue) -> Self {
        match value {
            SerializedValue::Array(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
            SerializedValue::String(s) => Value::String(s),
            SerializedValue::Int(i) => Value::from(i),
        }
    }
}

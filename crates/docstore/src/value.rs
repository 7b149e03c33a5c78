//! Closed value model for schema-free records and opaque option bags.
//!
//! Source databases attach untyped option maps to collections and indexes
//! (storage engine settings, partial filter expressions, and so on). Rather
//! than carrying a driver's dynamic document type through the core, these are
//! held as an open map of string to a small closed set of value kinds and
//! converted at the adapter boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A schema-free document generated for seeding or read back from a store.
pub type Record = BTreeMap<String, Value>;

/// An opaque key-value bag of collection or index options.
pub type OptionMap = BTreeMap<String, Value>;

/// A single field value inside a [`Record`] or [`OptionMap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    DateTime(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
    String(String),
    Array(Vec<Value>),
    Document(BTreeMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(v: OffsetDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Double(n.as_f64().unwrap_or(0.0)), Self::Int),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(fields) => Self::Document(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Converts a JSON object into a [`Record`]. Returns `None` for non-objects.
pub fn record_from_json(v: serde_json::Value) -> Option<Record> {
    match Value::from(v) {
        Value::Document(fields) => Some(fields),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_json_object() {
        let record = record_from_json(json!({
            "name": "Rustic Steel Chair",
            "price": 129.5,
            "stock": 42,
            "tags": ["furniture", "steel"],
            "dimensions": {"w": 40, "h": 90},
        }))
        .unwrap();

        assert_eq!(record["name"].as_str(), Some("Rustic Steel Chair"));
        assert_eq!(record["stock"].as_i64(), Some(42));
        assert_eq!(record["price"], Value::Double(129.5));
        assert!(matches!(record["tags"], Value::Array(ref items) if items.len() == 2));
        assert!(matches!(record["dimensions"], Value::Document(_)));
    }

    #[test]
    fn test_record_from_json_rejects_scalars() {
        assert!(record_from_json(json!(42)).is_none());
        assert!(record_from_json(json!("products")).is_none());
    }

    #[test]
    fn test_datetime_serializes_as_rfc3339() {
        let value = Value::DateTime(OffsetDateTime::UNIX_EPOCH);
        let encoded = serde_json::to_string(&value).unwrap();
        assert_eq!(encoded, "\"1970-01-01T00:00:00Z\"");
    }
}

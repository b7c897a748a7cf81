//! Attribute values as a tagged union.
//!
//! Values arrive already validated against the attribute's declared type;
//! the planner only needs to compare and copy them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::AttributeId;

/// A host's attribute values keyed by attribute.
pub type AttributeMap = BTreeMap<AttributeId, AttributeValue>;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Time(DateTime<Utc>),
    /// Ordered list of ids, used by organization-typed attributes.
    IdList(Vec<i64>),
}

impl AttributeValue {
    /// Whether the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the value with surrounding whitespace removed from strings.
    /// Non-string values are returned unchanged.
    pub fn trimmed(&self) -> AttributeValue {
        match self {
            Self::Str(s) => Self::Str(s.trim().to_string()),
            other => other.clone(),
        }
    }

    /// Short type name for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Time(_) => "time",
            Self::IdList(_) => "id_list",
        }
    }

    /// Convert an untyped JSON value received at a service boundary.
    ///
    /// Integers become `Int`, other numbers `Float`. Integers above `i64::MAX`
    /// are kept as their JSON text, as are arrays with non-integer elements
    /// and objects. Arrays whose elements are all integers become `IdList`.
    pub fn from_json(value: &serde_json::Value) -> AttributeValue {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) if n.is_f64() => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Str(n.to_string()),
            },
            Value::String(s) => Self::Str(s.clone()),
            Value::Array(items) => {
                let ids: Option<Vec<i64>> = items.iter().map(Value::as_i64).collect();
                match ids {
                    Some(ids) => Self::IdList(ids),
                    None => Self::Str(value.to_string()),
                }
            }
            Value::Object(_) => Self::Str(value.to_string()),
        }
    }

    /// Convert back to untyped JSON for a service boundary.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Str(s) => Value::String(s.clone()),
            Self::Time(t) => Value::String(t.to_rfc3339()),
            Self::IdList(ids) => Value::Array(ids.iter().map(|i| Value::from(*i)).collect()),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Time(v)
    }
}

impl From<Vec<i64>> for AttributeValue {
    fn from(v: Vec<i64>) -> Self {
        Self::IdList(v)
    }
}

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde_json::{Map, Value};

use crate::{error::RecordsError, grouping::Fields};

/// Group key derived from a dynamic record field.
///
/// Variants order as `Missing < Null < Bool < Number < Text`, so mixed key
/// types still sort deterministically.
#[derive(Debug, Clone)]
pub enum GroupKey {
    /// The field is absent from the record.
    Missing,
    Null,
    Bool(bool),
    Number(f64),
    /// Strings, plus arrays and objects in their compact JSON form.
    Text(String),
}

impl GroupKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Null => 1,
            Self::Bool(_) => 2,
            Self::Number(_) => 3,
            Self::Text(_) => 4,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(canonical(*n)),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

// -0.0 and every NaN payload collapse to one representative each.
fn canonical(n: f64) -> f64 {
    if n == 0.0 {
        0.0
    } else if n.is_nan() {
        f64::NAN
    } else {
        n
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => canonical(*a).total_cmp(&canonical(*b)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl Hash for GroupKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Self::Missing | Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Number(n) => canonical(*n).to_bits().hash(state),
            Self::Text(text) => text.hash(state),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("(none)"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", canonical(*n)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&Value> for GroupKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n
                .as_f64()
                .map_or_else(|| Self::Text(n.to_string()), Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Self::Text(value.to_string()),
        }
    }
}

impl From<Option<&Value>> for GroupKey {
    fn from(value: Option<&Value>) -> Self {
        value.map_or(Self::Missing, Self::from)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for GroupKey {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for GroupKey {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

// Magnitudes above 2^53 round to the nearest representable f64.
impl From<i64> for GroupKey {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for GroupKey {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl Fields<GroupKey> for Map<String, Value> {
    fn field(&self, name: &str) -> GroupKey {
        GroupKey::from(self.get(name))
    }
}

/// Non-object values have no fields, so every name is [`GroupKey::Missing`].
impl Fields<GroupKey> for Value {
    fn field(&self, name: &str) -> GroupKey {
        match self {
            Value::Object(map) => map.field(name),
            _ => GroupKey::Missing,
        }
    }
}

/// Parses a JSON array of records. Elements may be any JSON value.
pub fn parse_records(raw: &str) -> Result<Vec<Value>, RecordsError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Array(records) => Ok(records),
        other => Err(RecordsError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;

//! # Block Payloads
//!
//! The data a caller hands to [`Chain::append`](super::Chain::append). The
//! chain never interprets it; it only needs a stable canonical form to
//! hash.
//!
//! A payload is either a bare marker string (the genesis block carries
//! `"Genesis Block"`) or an ordered record of named fields whose values are
//! strings or numbers. Field order is part of the canonical form: two
//! records with the same fields in a different order hash differently.
//!
//! Numbers are finite by construction. `f64` values go through
//! `TryFrom`, which refuses NaN and infinities, so every payload that
//! exists can be serialized.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Errors raised while building a payload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayloadError {
    #[error("field value is not a finite number: {0}")]
    NonFiniteNumber(f64),
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A single field value: text or a finite number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(Number),
    Text(String),
}

impl FieldValue {
    /// Return the text content, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Number(_) => None,
        }
    }

    fn to_value(&self) -> Value {
        match self {
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(n.into())
    }
}

impl TryFrom<f64> for FieldValue {
    type Error = PayloadError;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        Number::from_f64(n)
            .map(FieldValue::Number)
            .ok_or(PayloadError::NonFiniteNumber(n))
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Named fields in insertion order.
///
/// Inserting a name that already exists replaces its value in place, so a
/// field keeps the position it was first given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<(String, FieldValue)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ```
    /// use rollcall_ledger::Fields;
    ///
    /// let fields = Fields::new().with("id", "123").with("name", "Your record");
    /// assert_eq!(fields.len(), 2);
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(self.0.len());
        for (name, value) in &self.0 {
            map.insert(name.clone(), value.to_value());
        }
        Value::Object(map)
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = Fields;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to string or number values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Fields, A::Error> {
                let mut fields = Fields::new();
                while let Some((name, value)) = access.next_entry::<String, FieldValue>()? {
                    fields.insert(name, value);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Opaque block content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// A fixed marker string, e.g. the genesis payload.
    Marker(String),
    /// An ordered record of named fields.
    Record(Fields),
}

impl Payload {
    pub fn marker(text: impl Into<String>) -> Self {
        Payload::Marker(text.into())
    }

    /// The JSON value hashed for this payload. Record fields keep their
    /// insertion order.
    pub fn canonical_value(&self) -> Value {
        match self {
            Payload::Marker(text) => Value::String(text.clone()),
            Payload::Record(fields) => fields.to_value(),
        }
    }

    /// Record fields, if this payload is a record.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            Payload::Record(fields) => Some(fields),
            Payload::Marker(_) => None,
        }
    }
}

impl From<Fields> for Payload {
    fn from(fields: Fields) -> Self {
        Payload::Record(fields)
    }
}

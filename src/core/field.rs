//! Field value types and type-aware comparison

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

/// The declared type of a descriptor field
///
/// Drives which filter operators are valid for a field and how two of its
/// values are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Uuid,
}

impl FieldKind {
    /// Whether values of this kind have a native ordering usable by
    /// greater-than / less-than / between predicates
    pub fn is_ordered(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Float | FieldKind::Date)
    }
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Coerce to a number for ordered comparison
    ///
    /// Integers and floats convert directly; numeric strings parse. Anything
    /// else has no numeric form.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Coerce to a timestamp for date comparison
    ///
    /// String values are accepted in RFC 3339 form; anything unparseable has
    /// no date form.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            FieldValue::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            _ => None,
        }
    }

    /// The lowercased textual form used by free-text search and string
    /// predicates
    ///
    /// `Null` renders as the empty string so missing values never match a
    /// non-empty query.
    pub fn text(&self) -> String {
        match self {
            FieldValue::String(s) => s.to_lowercase(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Uuid(u) => u.to_string(),
            FieldValue::DateTime(dt) => dt.to_rfc3339(),
            FieldValue::Null => String::new(),
        }
    }

    /// Type-aware comparison under a declared field kind
    ///
    /// Strings compare case-insensitively. Numeric comparison coerces missing
    /// values to 0, date comparison sorts missing/invalid dates earliest,
    /// missing booleans compare as false. The rules are total, so sorting
    /// never fails on mixed or absent data.
    pub fn compare(&self, other: &FieldValue, kind: FieldKind) -> Ordering {
        match kind {
            FieldKind::String => self.text().cmp(&other.text()),
            FieldKind::Integer | FieldKind::Float => {
                let a = self.as_number().unwrap_or(0.0);
                let b = other.as_number().unwrap_or(0.0);
                a.total_cmp(&b)
            }
            FieldKind::Boolean => {
                let a = self.as_bool().unwrap_or(false);
                let b = other.as_bool().unwrap_or(false);
                a.cmp(&b)
            }
            FieldKind::Date => {
                let a = self
                    .as_datetime()
                    .map(|dt| dt.timestamp_millis())
                    .unwrap_or(i64::MIN);
                let b = other
                    .as_datetime()
                    .map(|dt| dt.timestamp_millis())
                    .unwrap_or(i64::MIN);
                a.cmp(&b)
            }
            FieldKind::Uuid => match (self.as_uuid(), other.as_uuid()) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => self.text().cmp(&other.text()),
            },
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<Uuid> for FieldValue {
    fn from(u: Uuid) -> Self {
        FieldValue::Uuid(u)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        FieldValue::DateTime(dt)
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}

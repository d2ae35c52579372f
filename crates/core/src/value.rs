//! Value types for record keys and data fields
//!
//! ## Keys
//!
//! [`RecordKey`] identifies a record within its collection. Three key types
//! are supported: unsigned integers, strings and UUIDs. Keys are totally
//! ordered so search ties can be broken deterministically; a collection only
//! ever holds keys of a single [`KeyType`].
//!
//! ## Data fields
//!
//! [`FieldValue`] is the scalar carried by a data field. Equality follows
//! these rules:
//!
//! - Different types are NEVER equal (no coercion at this level)
//! - `Int(1)` != `Float(1.0)`
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//!
//! Filters widen an `Int` literal when it targets a `Float` field; that
//! happens at bind time, not here.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

/// Type of a collection's key field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    /// Unsigned 64-bit integer
    U64,
    /// UTF-8 string
    String,
    /// UUID
    Uuid,
}

impl KeyType {
    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            KeyType::U64 => "u64",
            KeyType::String => "string",
            KeyType::Uuid => "uuid",
        }
    }
}

/// Key value of a record
///
/// Ordering is derived: variants compare by declaration order first, then by
/// value. Within one collection every key has the same variant, so the
/// effective order is the natural order of the key type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKey {
    /// Unsigned integer key
    U64(u64),
    /// String key
    String(String),
    /// UUID key
    Uuid(Uuid),
}

impl RecordKey {
    /// Type of this key
    pub fn key_type(&self) -> KeyType {
        match self {
            RecordKey::U64(_) => KeyType::U64,
            RecordKey::String(_) => KeyType::String,
            RecordKey::Uuid(_) => KeyType::Uuid,
        }
    }

    /// Try to get as u64
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            RecordKey::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordKey::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as UUID
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            RecordKey::Uuid(u) => Some(*u),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::U64(v) => write!(f, "{}", v),
            RecordKey::String(s) => write!(f, "{}", s),
            RecordKey::Uuid(u) => write!(f, "{}", u),
        }
    }
}

impl From<u64> for RecordKey {
    fn from(v: u64) -> Self {
        RecordKey::U64(v)
    }
}

impl From<u32> for RecordKey {
    fn from(v: u32) -> Self {
        RecordKey::U64(v as u64)
    }
}

impl From<String> for RecordKey {
    fn from(v: String) -> Self {
        RecordKey::String(v)
    }
}

impl From<&str> for RecordKey {
    fn from(v: &str) -> Self {
        RecordKey::String(v.to_string())
    }
}

impl From<Uuid> for RecordKey {
    fn from(v: Uuid) -> Self {
        RecordKey::Uuid(v)
    }
}

impl From<&RecordKey> for RecordKey {
    fn from(v: &RecordKey) -> Self {
        v.clone()
    }
}

/// Type of a data field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// UTF-8 string (short text)
    String,
}

impl FieldType {
    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::String => "string",
        }
    }

    /// Whether values of this type have a meaningful order for comparisons
    pub fn is_ordered(&self) -> bool {
        !matches!(self, FieldType::Bool)
    }
}

/// Scalar value of a data field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    /// Absence of a value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit IEEE-754 floating point
    Float(f64),
    /// UTF-8 string
    String(String),
}

impl FieldValue {
    /// Type of this value, `None` for `Null`
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(_) => Some(FieldType::Bool),
            FieldValue::Int(_) => Some(FieldType::Int),
            FieldValue::Float(_) => Some(FieldType::Float),
            FieldValue::String(_) => Some(FieldType::String),
        }
    }

    /// Returns the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        self.field_type().map_or("null", |t| t.name())
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Order two values of the same type
    ///
    /// Returns `None` across types, for `Null`, for booleans, and when a float
    /// comparison involves NaN.
    pub fn partial_order(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.partial_cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Float(v as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}

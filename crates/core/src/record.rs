//! Records stored in a collection
//!
//! A [`Record`] is the schema-agnostic shape of a stored item: a key, a map of
//! data fields and a map of vector fields. Whether a record fits a collection
//! is decided by [`CollectionSchema::validate_record`].
//!
//! Applications with their own record structs implement [`VectorRecord`] to
//! convert to and from this shape.
//!
//! [`CollectionSchema::validate_record`]: crate::schema::CollectionSchema::validate_record

use crate::error::{VectorError, VectorResult};
use crate::schema::CollectionSchema;
use crate::value::{FieldValue, RecordKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A keyed record with data and vector fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    key: RecordKey,
    data: BTreeMap<String, FieldValue>,
    vectors: BTreeMap<String, Vec<f32>>,
}

impl Record {
    /// Create an empty record with the given key
    pub fn new(key: impl Into<RecordKey>) -> Self {
        Record {
            key: key.into(),
            data: BTreeMap::new(),
            vectors: BTreeMap::new(),
        }
    }

    /// Builder-style [`Record::set_field`]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Builder-style [`Record::set_vector`]
    pub fn with_vector(mut self, name: impl Into<String>, vector: Vec<f32>) -> Self {
        self.set_vector(name, vector);
        self
    }

    /// Record key
    pub fn key(&self) -> &RecordKey {
        &self.key
    }

    /// Replace the key
    pub fn set_key(&mut self, key: impl Into<RecordKey>) {
        self.key = key.into();
    }

    /// Set a data field, replacing any previous value
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.data.insert(name.into(), value.into());
    }

    /// Set a vector field, replacing any previous vector
    pub fn set_vector(&mut self, name: impl Into<String>, vector: Vec<f32>) {
        self.vectors.insert(name.into(), vector);
    }

    /// Get a data field
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.data.get(name)
    }

    /// Get a vector field
    pub fn vector(&self, name: &str) -> Option<&[f32]> {
        self.vectors.get(name).map(Vec::as_slice)
    }

    /// Iterate data fields in name order
    pub fn data(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate vector fields in name order
    pub fn vectors(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.vectors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Remove and return a data field
    pub fn take_field(&mut self, name: &str) -> Option<FieldValue> {
        self.data.remove(name)
    }

    /// Remove and return a vector field
    pub fn take_vector(&mut self, name: &str) -> Option<Vec<f32>> {
        self.vectors.remove(name)
    }

    /// Remove a string data field, failing unless it holds a string
    ///
    /// Convenience for [`VectorRecord::from_record`] implementations.
    pub fn take_string(&mut self, name: &str) -> VectorResult<String> {
        match self.take_field(name) {
            Some(FieldValue::String(s)) => Ok(s),
            Some(other) => Err(VectorError::invalid_record(format!(
                "field '{}' is {}, expected string",
                name,
                other.type_name()
            ))),
            None => Err(VectorError::invalid_record(format!(
                "missing data field '{}'",
                name
            ))),
        }
    }

    /// Remove a vector field, failing if absent
    pub fn require_vector(&mut self, name: &str) -> VectorResult<Vec<f32>> {
        self.take_vector(name).ok_or_else(|| {
            VectorError::invalid_record(format!("missing vector field '{}'", name))
        })
    }
}

/// Application record type bound to a fixed schema
///
/// Implementors describe their schema once and convert to and from the
/// generic [`Record`] shape. The store uses this to hand out collections typed
/// by the application's own struct.
pub trait VectorRecord: Sized {
    /// Schema shared by every record of this type
    fn schema() -> VectorResult<CollectionSchema>;

    /// Convert into a generic record
    fn into_record(self) -> Record;

    /// Convert from a generic record
    ///
    /// Fails with `InvalidRecord` when a field is missing or has the wrong type.
    fn from_record(record: Record) -> VectorResult<Self>;
}

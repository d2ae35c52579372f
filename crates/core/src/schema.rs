//! Collection schemas
//!
//! A [`CollectionSchema`] enumerates the role of every field of a record:
//!
//! - exactly one **key** field ([`KeyFieldSpec`])
//! - zero or more **data** fields ([`DataFieldSpec`]), each optionally
//!   *indexed*, i.e. eligible to appear in filters
//! - one or more **vector** fields ([`VectorFieldSpec`])
//!
//! Schemas are built once through [`CollectionSchemaBuilder`], validated
//! eagerly, and then reused for every record operation on the collection.
//! Two schemas are the same collection identity iff they compare equal.

use crate::error::{VectorError, VectorResult};
use crate::primitives::vector::{DistanceMetric, VectorFieldSpec};
use crate::record::Record;
use crate::value::{FieldType, KeyType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Declaration of the key field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyFieldSpec {
    /// Field name
    pub name: String,
    /// Key value type
    pub key_type: KeyType,
}

/// Declaration of one data field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataFieldSpec {
    /// Field name
    pub name: String,
    /// Value type (a record may also hold `Null`)
    pub field_type: FieldType,
    /// Eligible to appear in filter predicates
    pub indexed: bool,
}

/// Schema of a collection
///
/// Deserialization goes through [`CollectionSchemaBuilder::build`], so a
/// decoded schema satisfies the same invariants as a built one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDescriptor")]
pub struct CollectionSchema {
    key: KeyFieldSpec,
    data: Vec<DataFieldSpec>,
    vectors: Vec<VectorFieldSpec>,
}

/// Unvalidated wire form of [`CollectionSchema`]
#[derive(Deserialize)]
struct SchemaDescriptor {
    key: KeyFieldSpec,
    #[serde(default)]
    data: Vec<DataFieldSpec>,
    #[serde(default)]
    vectors: Vec<VectorFieldSpec>,
}

impl TryFrom<SchemaDescriptor> for CollectionSchema {
    type Error = VectorError;

    fn try_from(raw: SchemaDescriptor) -> VectorResult<Self> {
        CollectionSchemaBuilder {
            key: raw.key,
            data: raw.data,
            vectors: raw
                .vectors
                .into_iter()
                .map(|v| (v.name, v.dimension, v.metric))
                .collect(),
        }
        .build()
    }
}

impl CollectionSchema {
    /// Start building a schema with the given key field
    pub fn builder(key_name: impl Into<String>, key_type: KeyType) -> CollectionSchemaBuilder {
        CollectionSchemaBuilder::new(key_name, key_type)
    }

    /// Key field declaration
    pub fn key(&self) -> &KeyFieldSpec {
        &self.key
    }

    /// Data field declarations, in declaration order
    pub fn data_fields(&self) -> &[DataFieldSpec] {
        &self.data
    }

    /// Vector field declarations, in declaration order
    pub fn vector_fields(&self) -> &[VectorFieldSpec] {
        &self.vectors
    }

    /// Look up a data field by name
    pub fn data_field(&self, name: &str) -> Option<&DataFieldSpec> {
        self.data.iter().find(|f| f.name == name)
    }

    /// Look up a vector field by name
    pub fn vector_field(&self, name: &str) -> Option<&VectorFieldSpec> {
        self.vectors.iter().find(|f| f.name == name)
    }

    /// The first declared vector field, used when a search names none
    pub fn default_vector_field(&self) -> &VectorFieldSpec {
        // build() guarantees at least one vector field
        &self.vectors[0]
    }

    /// Largest declared vector dimension
    pub fn max_dimension(&self) -> usize {
        self.vectors.iter().map(|v| v.dimension).max().unwrap_or(0)
    }

    /// Check a record against this schema
    ///
    /// The record must carry a key of the declared type, exactly the declared
    /// data fields (each `Null` or of the declared type), and exactly the
    /// declared vector fields with matching dimensions and finite components.
    pub fn validate_record(&self, record: &Record) -> VectorResult<()> {
        let key_type = record.key().key_type();
        if key_type != self.key.key_type {
            return Err(VectorError::invalid_record(format!(
                "key '{}' must be {}, got {}",
                self.key.name,
                self.key.key_type.name(),
                key_type.name()
            )));
        }

        for (name, value) in record.data() {
            let Some(spec) = self.data_field(name) else {
                return Err(VectorError::invalid_record(format!(
                    "undeclared data field '{}'",
                    name
                )));
            };
            if let Some(actual) = value.field_type() {
                if actual != spec.field_type {
                    return Err(VectorError::invalid_record(format!(
                        "data field '{}' must be {}, got {}",
                        name,
                        spec.field_type.name(),
                        actual.name()
                    )));
                }
            }
        }
        if let Some(missing) = self.data.iter().find(|f| record.field(&f.name).is_none()) {
            return Err(VectorError::invalid_record(format!(
                "missing data field '{}'",
                missing.name
            )));
        }

        for (name, vector) in record.vectors() {
            let Some(spec) = self.vector_field(name) else {
                return Err(VectorError::invalid_record(format!(
                    "undeclared vector field '{}'",
                    name
                )));
            };
            spec.check(vector)?;
        }
        if let Some(missing) = self.vectors.iter().find(|v| record.vector(&v.name).is_none()) {
            return Err(VectorError::invalid_record(format!(
                "missing vector field '{}'",
                missing.name
            )));
        }

        Ok(())
    }

    /// Describe the first difference between two schemas, if any
    pub fn difference(&self, other: &CollectionSchema) -> Option<String> {
        if self.key != other.key {
            return Some(format!(
                "key field {}:{} vs {}:{}",
                self.key.name,
                self.key.key_type.name(),
                other.key.name,
                other.key.key_type.name()
            ));
        }
        if self.data != other.data {
            return Some("data fields differ".to_string());
        }
        for (a, b) in self.vectors.iter().zip(&other.vectors) {
            if a != b {
                return Some(format!(
                    "vector field {} ({}, {}) vs {} ({}, {})",
                    a.name, a.dimension, a.metric, b.name, b.dimension, b.metric
                ));
            }
        }
        if self.vectors.len() != other.vectors.len() {
            return Some(format!(
                "{} vector fields vs {}",
                self.vectors.len(),
                other.vectors.len()
            ));
        }
        None
    }
}

/// Builder for [`CollectionSchema`]
///
/// # Example
///
/// ```
/// use stratavec_core::{CollectionSchema, DistanceMetric, FieldType, KeyType};
///
/// let schema = CollectionSchema::builder("id", KeyType::U64)
///     .indexed_field("category", FieldType::String)
///     .field("term", FieldType::String)
///     .field("definition", FieldType::String)
///     .vector("embedding", 3, DistanceMetric::Cosine)
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.default_vector_field().dimension, 3);
/// ```
#[derive(Debug, Clone)]
pub struct CollectionSchemaBuilder {
    key: KeyFieldSpec,
    data: Vec<DataFieldSpec>,
    vectors: Vec<(String, usize, DistanceMetric)>,
}

impl CollectionSchemaBuilder {
    /// Create a builder with the given key field
    pub fn new(key_name: impl Into<String>, key_type: KeyType) -> Self {
        Self {
            key: KeyFieldSpec {
                name: key_name.into(),
                key_type,
            },
            data: Vec::new(),
            vectors: Vec::new(),
        }
    }

    /// Add a data field that cannot be filtered on
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.data.push(DataFieldSpec {
            name: name.into(),
            field_type,
            indexed: false,
        });
        self
    }

    /// Add a data field that filters may reference
    pub fn indexed_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.data.push(DataFieldSpec {
            name: name.into(),
            field_type,
            indexed: true,
        });
        self
    }

    /// Add a vector field
    pub fn vector(mut self, name: impl Into<String>, dimension: usize, metric: DistanceMetric) -> Self {
        self.vectors.push((name.into(), dimension, metric));
        self
    }

    /// Validate and build the schema
    ///
    /// # Errors
    /// - `InvalidSchema` if a name is empty or repeated, a dimension is 0, or
    ///   no vector field was declared
    pub fn build(self) -> VectorResult<CollectionSchema> {
        if self.vectors.is_empty() {
            return Err(VectorError::invalid_schema(
                "at least one vector field is required",
            ));
        }

        let mut seen = HashSet::new();
        let names = std::iter::once(&self.key.name)
            .chain(self.data.iter().map(|f| &f.name))
            .chain(self.vectors.iter().map(|(n, _, _)| n));
        for name in names {
            if name.is_empty() {
                return Err(VectorError::invalid_schema("field names must not be empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(VectorError::invalid_schema(format!(
                    "field '{}' is declared more than once",
                    name
                )));
            }
        }

        let vectors = self
            .vectors
            .into_iter()
            .map(|(name, dimension, metric)| VectorFieldSpec::new(name, dimension, metric))
            .collect::<VectorResult<Vec<_>>>()?;

        Ok(CollectionSchema {
            key: self.key,
            data: self.data,
            vectors,
        })
    }
}

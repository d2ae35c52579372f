//! Core types for the stratavec vector store
//!
//! This crate defines the data model shared by every other crate:
//! - [`RecordKey`] / [`FieldValue`]: key and data field values
//! - [`CollectionSchema`]: per-collection field roles, validated eagerly
//! - [`Record`] / [`VectorRecord`]: stored items and typed mappings
//! - [`DistanceMetric`] / [`VectorFieldSpec`]: vector field declarations
//! - [`VectorError`]: error kinds for every core operation
//! - [`StoreConfig`]: store limits
//!
//! No logic here touches collection state; that lives in `stratavec-primitives`.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod primitives;
pub mod record;
pub mod schema;
pub mod value;

pub use config::StoreConfig;
pub use error::{VectorError, VectorResult};
pub use primitives::vector::{DistanceMetric, VectorFieldSpec};
pub use record::{Record, VectorRecord};
pub use schema::{CollectionSchema, CollectionSchemaBuilder, DataFieldSpec, KeyFieldSpec};
pub use value::{FieldType, FieldValue, KeyType, RecordKey};

//! Error types for vector store operations
//!
//! Every error here describes a programmer or schema mistake, never a
//! transient condition. Nothing is retried internally; errors surface to the
//! caller as soon as they are detected.
//!
//! ## Lookups
//!
//! A missing record is NOT an error: `get` returns `None` and `delete`
//! returns `false`. `CollectionNotFound` is reserved for handles whose
//! collection has not been ensured yet, or has been dropped.

use thiserror::Error;

/// Errors raised by schema validation, record validation, filtering and search
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    /// Vector length disagrees with the declared dimension
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Declared dimension
        expected: usize,
        /// Length actually supplied
        got: usize,
    },

    /// Filter references an unknown or unindexed field, or carries a literal
    /// the field cannot hold
    #[error("invalid filter field '{field}': {reason}")]
    InvalidFilterField {
        /// Field named by the filter
        field: String,
        /// Why the field was rejected
        reason: String,
    },

    /// Collection re-registered with a schema different from the first one
    #[error("schema mismatch for collection '{name}': {reason}")]
    SchemaMismatch {
        /// Collection name
        name: String,
        /// What differs
        reason: String,
    },

    /// Schema failed validation while being built or registered
    #[error("invalid schema: {reason}")]
    InvalidSchema {
        /// Why the schema was rejected
        reason: String,
    },

    /// Record does not conform to its collection's schema
    #[error("invalid record: {reason}")]
    InvalidRecord {
        /// Why the record was rejected
        reason: String,
    },

    /// Search named a vector field the schema does not declare
    #[error("unknown vector field '{field}'")]
    UnknownVectorField {
        /// Requested vector field
        field: String,
    },

    /// `top_k` is zero or above the configured maximum
    #[error("invalid top_k {k}: must be between 1 and {max}")]
    InvalidTopK {
        /// Requested result count
        k: usize,
        /// Configured maximum
        max: usize,
    },

    /// Collection has not been created yet, or was dropped
    #[error("collection not found: {name}")]
    CollectionNotFound {
        /// Collection name
        name: String,
    },

    /// Collection name failed validation
    #[error("invalid collection name '{name}': {reason}")]
    InvalidCollectionName {
        /// Rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// A configured store limit was reached
    #[error("{resource} capacity exceeded (limit {limit})")]
    CapacityExceeded {
        /// Limited resource
        resource: &'static str,
        /// Configured limit
        limit: usize,
    },

    /// Configuration could not be loaded or is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Details
        message: String,
    },
}

/// Result type for vector store operations
pub type VectorResult<T> = Result<T, VectorError>;

impl VectorError {
    /// Shorthand for [`VectorError::InvalidRecord`]
    pub fn invalid_record(reason: impl Into<String>) -> Self {
        VectorError::InvalidRecord {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`VectorError::InvalidSchema`]
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        VectorError::InvalidSchema {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`VectorError::InvalidFilterField`]
    pub fn invalid_filter_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        VectorError::InvalidFilterField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a dimension mismatch
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, VectorError::DimensionMismatch { .. })
    }

    /// Check if this error comes from schema definition or registration
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            VectorError::SchemaMismatch { .. } | VectorError::InvalidSchema { .. }
        )
    }

    /// Check if this is a missing-collection error
    pub fn is_not_found(&self) -> bool {
        matches!(self, VectorError::CollectionNotFound { .. })
    }
}

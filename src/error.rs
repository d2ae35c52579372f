//! Unified error type for stratavec.
//!
//! Wraps the per-crate errors (`VectorError`, `EmbedError`, `IngestError`)
//! in one enum with stable categories, so applications can match on what went
//! wrong without depending on every crate.

use stratavec_core::VectorError;
use stratavec_intelligence::{EmbedError, IngestError};
use thiserror::Error;

/// All stratavec errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Vector length disagrees with the declared dimension
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Declared dimension
        expected: usize,
        /// Length supplied
        got: usize,
    },

    /// Filter cannot be evaluated against the schema
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    /// Collection already registered with a different schema
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Malformed schema, record, name or search parameter
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Collection missing or dropped
    #[error("not found: {0}")]
    NotFound(String),

    /// A configured limit was reached
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The embedder failed
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for stratavec operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a dimension mismatch.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Error::DimensionMismatch { .. })
    }

    /// Check if the caller supplied something the store rejects.
    ///
    /// True for filters, schemas and any other malformed input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_)
                | Error::InvalidFilter(_)
                | Error::SchemaMismatch(_)
                | Error::DimensionMismatch { .. }
        )
    }

    /// Check if the embedder failed.
    pub fn is_embedding(&self) -> bool {
        matches!(self, Error::Embedding(_))
    }
}

impl From<VectorError> for Error {
    fn from(e: VectorError) -> Self {
        match e {
            VectorError::DimensionMismatch { expected, got } => {
                Error::DimensionMismatch { expected, got }
            }
            VectorError::InvalidFilterField { field, reason } => {
                Error::InvalidFilter(format!("field '{}': {}", field, reason))
            }
            VectorError::SchemaMismatch { name, reason } => {
                Error::SchemaMismatch(format!("collection '{}': {}", name, reason))
            }
            VectorError::CollectionNotFound { name } => {
                Error::NotFound(format!("collection '{}'", name))
            }
            VectorError::CapacityExceeded { .. } => Error::ConstraintViolation(e.to_string()),
            VectorError::Config { message } => Error::Config(message),
            VectorError::InvalidSchema { .. }
            | VectorError::InvalidRecord { .. }
            | VectorError::UnknownVectorField { .. }
            | VectorError::InvalidTopK { .. }
            | VectorError::InvalidCollectionName { .. } => Error::InvalidInput(e.to_string()),
        }
    }
}

impl From<EmbedError> for Error {
    fn from(e: EmbedError) -> Self {
        Error::Embedding(e.to_string())
    }
}

impl From<IngestError> for Error {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::Embed(e) => e.into(),
            IngestError::Store(e) => e.into(),
        }
    }
}

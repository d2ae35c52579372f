//! Text embedding boundary.
//!
//! [`Embedder`] is the seam between the store and whatever produces vectors
//! from text: a local model, a remote service, or [`HashingEmbedder`] in tests.
//! Embedders must be `Send + Sync` so ingestion can fan out across threads.

pub mod hashing;
pub mod tokenizer;

pub use hashing::HashingEmbedder;

use thiserror::Error;

/// Embedding failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmbedError {
    /// The embedder could not produce a vector
    #[error("embedding failed: {reason}")]
    Failed {
        /// Cause reported by the embedder
        reason: String,
    },

    /// The embedder returned a vector of the wrong length
    #[error("embedder returned {got} components, expected {expected}")]
    DimensionMismatch {
        /// Declared dimension
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Nothing to embed
    #[error("input text is empty")]
    EmptyInput,
}

/// Text to vector conversion.
pub trait Embedder: Send + Sync {
    /// Length of every vector this embedder returns.
    fn dimension(&self) -> usize;

    /// Embed one text.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
}

impl<E: Embedder + ?Sized> Embedder for &E {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        (**self).embed(text)
    }
}

impl<E: Embedder + ?Sized> Embedder for std::sync::Arc<E> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        (**self).embed(text)
    }
}

/// Embed one text and check the result's length.
pub fn embed_checked<E: Embedder + ?Sized>(embedder: &E, text: &str) -> Result<Vec<f32>, EmbedError> {
    let vector = embedder.embed(text)?;
    if vector.len() != embedder.dimension() {
        return Err(EmbedError::DimensionMismatch {
            expected: embedder.dimension(),
            got: vector.len(),
        });
    }
    Ok(vector)
}

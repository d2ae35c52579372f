//! Feature-hashing embedder.
//!
//! Each word is hashed with xxh3 into one of `dimension` buckets; a second
//! hash bit picks the sign. The bucket vector is L2-normalized, so cosine
//! similarity reflects shared vocabulary. This is a lexical stand-in for a
//! real model, useful for demos and tests.

use super::tokenizer::words;
use super::{EmbedError, Embedder};
use xxhash_rust::xxh3::xxh3_64_with_seed;

const SEED: u64 = 0x5eed_0f_57a7a;

/// Deterministic bag-of-words embedder.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    /// Create an embedder producing vectors of `dimension` components.
    ///
    /// Fails if `dimension` is 0.
    pub fn new(dimension: usize) -> Result<Self, EmbedError> {
        if dimension == 0 {
            return Err(EmbedError::Failed {
                reason: "dimension must be > 0".to_string(),
            });
        }
        Ok(Self { dimension })
    }
}

impl Embedder for HashingEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let tokens = words(text);
        if tokens.is_empty() {
            return Err(EmbedError::EmptyInput);
        }

        let mut buckets = vec![0.0f32; self.dimension];
        for token in &tokens {
            let h = xxh3_64_with_seed(token.as_bytes(), SEED);
            let bucket = (h % self.dimension as u64) as usize;
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            buckets[bucket] += sign;
        }

        let norm = buckets.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut buckets {
                *x /= norm;
            }
        }
        Ok(buckets)
    }
}

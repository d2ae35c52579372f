//! Vector field types
//!
//! These types describe the vector fields of a collection schema.
//! Implementation logic (distance calculations, ranking) remains in primitives.

use crate::error::{VectorError, VectorResult};
use serde::{Deserialize, Serialize};

/// Similarity metric of a vector field
///
/// Scores are reported raw, in the metric's own units. Ranking direction
/// differs per metric: see [`DistanceMetric::higher_is_better`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Cosine similarity: dot(a,b) / (||a|| * ||b||)
    /// Range: [-1, 1], higher = more similar
    /// Zero-magnitude vectors score 0
    #[default]
    Cosine,

    /// Euclidean (L2) distance
    /// Range: [0, inf), lower = more similar
    Euclidean,

    /// Dot product (raw value)
    /// Range: unbounded, higher = more similar
    DotProduct,
}

impl DistanceMetric {
    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::DotProduct => "dot_product",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cosine" => Some(DistanceMetric::Cosine),
            "euclidean" | "l2" => Some(DistanceMetric::Euclidean),
            "dot_product" | "dot" | "inner_product" => Some(DistanceMetric::DotProduct),
            _ => None,
        }
    }

    /// True for similarity metrics, false for distance metrics
    pub fn higher_is_better(&self) -> bool {
        match self {
            DistanceMetric::Cosine | DistanceMetric::DotProduct => true,
            DistanceMetric::Euclidean => false,
        }
    }

    /// Best-first ordering of two scores under this metric
    ///
    /// `Less` means `a` ranks ahead of `b`. NaN sorts last for similarity
    /// metrics and first for distances, following `f32::total_cmp`.
    pub fn rank(&self, a: f32, b: f32) -> std::cmp::Ordering {
        if self.higher_is_better() {
            b.total_cmp(&a)
        } else {
            a.total_cmp(&b)
        }
    }

    /// Score a vector gets when compared with itself, if the metric has a
    /// fixed best value
    pub fn best_score(&self) -> Option<f32> {
        match self {
            DistanceMetric::Cosine => Some(1.0),
            DistanceMetric::Euclidean => Some(0.0),
            DistanceMetric::DotProduct => None,
        }
    }
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Declaration of one vector field
///
/// Dimension must be > 0. Immutable once the owning collection is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VectorFieldSpec {
    /// Field name
    pub name: String,

    /// Embedding dimension (e.g., 384, 768, 1536)
    pub dimension: usize,

    /// Similarity metric
    pub metric: DistanceMetric,
}

impl VectorFieldSpec {
    /// Create a new spec with validation
    ///
    /// Returns an error if dimension is 0.
    pub fn new(
        name: impl Into<String>,
        dimension: usize,
        metric: DistanceMetric,
    ) -> VectorResult<Self> {
        let name = name.into();
        if dimension == 0 {
            return Err(VectorError::invalid_schema(format!(
                "vector field '{}' has dimension 0 (must be > 0)",
                name
            )));
        }
        Ok(VectorFieldSpec {
            name,
            dimension,
            metric,
        })
    }

    /// Check a vector against this declaration
    ///
    /// Length must equal the dimension and every component must be finite.
    pub fn check(&self, vector: &[f32]) -> VectorResult<()> {
        if vector.len() != self.dimension {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimension,
                got: vector.len(),
            });
        }
        if let Some(pos) = vector.iter().position(|v| !v.is_finite()) {
            return Err(VectorError::invalid_record(format!(
                "vector field '{}' has a non-finite component at index {}",
                self.name, pos
            )));
        }
        Ok(())
    }
}

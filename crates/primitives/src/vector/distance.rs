//! Similarity functions
//!
//! Pure functions over equal-length `f32` slices. Sums are accumulated in
//! `f64` and narrowed once, so results are deterministic for a given input
//! order; cross-platform reproducibility is only guaranteed to a small epsilon.
//!
//! The per-metric helpers (`cosine_similarity`, `dot_product`,
//! `euclidean_distance`) assume equal lengths and are used by the search loop
//! after the query has been validated once. [`similarity`] checks lengths.

use stratavec_core::{DistanceMetric, VectorError, VectorResult};

/// Score two vectors with the given metric
///
/// # Errors
/// - `DimensionMismatch` if the lengths differ (`expected` is `a.len()`)
pub fn similarity(metric: DistanceMetric, a: &[f32], b: &[f32]) -> VectorResult<f32> {
    if a.len() != b.len() {
        return Err(VectorError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(score(metric, a, b))
}

/// Score two vectors of equal length
#[inline]
pub(crate) fn score(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    match metric {
        DistanceMetric::Cosine => cosine_similarity(a, b),
        DistanceMetric::Euclidean => euclidean_distance(a, b),
        DistanceMetric::DotProduct => dot_product(a, b),
    }
}

/// Cosine similarity in [-1, 1]
///
/// Returns 0.0 when either vector has zero magnitude, rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let cos = dot / (norm_a.sqrt() * norm_b.sqrt());
    cos.clamp(-1.0, 1.0) as f32
}

/// Raw dot product
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| *x as f64 * *y as f64)
        .sum::<f64>() as f32
}

/// Euclidean (L2) distance, >= 0
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt() as f32
}

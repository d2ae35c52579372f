//! Brute-force top-K search
//!
//! ## Algorithm
//!
//! 1. Bind the filter against the schema (fails before any scan)
//! 2. Retain records the filter accepts
//! 3. Score each retained record against the query
//! 4. Drop scores worse than `min_score`, if set
//! 5. Rank best-first for the metric, ties by ascending key
//! 6. Keep the first `top_k`
//!
//! Ranking direction is per metric: cosine and dot product rank descending,
//! Euclidean distance ranks ascending. Scores are reported raw.

use crate::vector::distance;
use crate::vector::filter::{BoundFilter, Filter};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use stratavec_core::{
    CollectionSchema, DistanceMetric, Record, RecordKey, VectorError, VectorFieldSpec,
    VectorResult,
};

/// Search result entry: a record and its raw metric score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Matched record
    pub record: Record,

    /// Metric output (higher = better for cosine/dot, lower = better for
    /// Euclidean distance)
    pub score: f32,
}

impl SearchResult {
    /// Key of the matched record
    pub fn key(&self) -> &RecordKey {
        self.record.key()
    }
}

/// Full search parameters
///
/// # Example
///
/// ```ignore
/// let request = SearchRequest::new(vec![1.0, 0.0, 0.0], 5)
///     .vector_field("embedding")
///     .filter(Filter::eq("category", "Ext"))
///     .min_score(0.5);
/// let results = collection.search_with(&request)?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Query vector
    pub query: Vec<f32>,

    /// Maximum number of results (>= 1)
    pub top_k: usize,

    /// Vector field to search (default: the schema's first vector field)
    pub vector_field: Option<String>,

    /// Optional filter over data fields
    pub filter: Option<Filter>,

    /// Worst acceptable score: `score >= t` for similarity metrics,
    /// `score <= t` for distance metrics
    pub min_score: Option<f32>,
}

impl SearchRequest {
    /// Create a request for the default vector field
    pub fn new(query: impl Into<Vec<f32>>, top_k: usize) -> Self {
        SearchRequest {
            query: query.into(),
            top_k,
            vector_field: None,
            filter: None,
            min_score: None,
        }
    }

    /// Search the named vector field
    pub fn vector_field(mut self, name: impl Into<String>) -> Self {
        self.vector_field = Some(name.into());
        self
    }

    /// Restrict candidates with a filter
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Drop results worse than the threshold
    pub fn min_score(mut self, threshold: f32) -> Self {
        self.min_score = Some(threshold);
        self
    }
}

/// Best-first ordering of two scores under a metric
pub fn best_first(metric: DistanceMetric, a: f32, b: f32) -> Ordering {
    metric.rank(a, b)
}

/// A validated search, ready to scan
pub(crate) struct PreparedSearch<'a> {
    field: &'a VectorFieldSpec,
    query: &'a [f32],
    top_k: usize,
    filter: Option<BoundFilter>,
    min_score: Option<f32>,
}

/// Result of a scan plus counters for logging
pub(crate) struct SearchOutcome {
    pub results: Vec<SearchResult>,
    pub scanned: usize,
    pub matched: usize,
}

impl<'a> PreparedSearch<'a> {
    /// Validate search parameters against the schema
    ///
    /// # Errors
    /// - `InvalidTopK` if `top_k` is 0 or above `max_top_k`
    /// - `UnknownVectorField` if the named vector field is not declared
    /// - `DimensionMismatch` if the query length differs from the field
    /// - `InvalidFilterField` if the filter fails to bind
    pub(crate) fn prepare(
        schema: &'a CollectionSchema,
        query: &'a [f32],
        top_k: usize,
        vector_field: Option<&str>,
        filter: Option<&Filter>,
        min_score: Option<f32>,
        max_top_k: usize,
    ) -> VectorResult<Self> {
        if top_k == 0 || top_k > max_top_k {
            return Err(VectorError::InvalidTopK {
                k: top_k,
                max: max_top_k,
            });
        }

        let field = match vector_field {
            Some(name) => schema
                .vector_field(name)
                .ok_or_else(|| VectorError::UnknownVectorField {
                    field: name.to_string(),
                })?,
            None => schema.default_vector_field(),
        };

        // Same length and finiteness rules as stored vectors
        field.check(query)?;

        let filter = filter.map(|f| f.bind(schema)).transpose()?;

        Ok(PreparedSearch {
            field,
            query,
            top_k,
            filter,
            min_score,
        })
    }

    /// Scan records and return the ranked top-K
    pub(crate) fn execute<'r>(
        &self,
        records: impl Iterator<Item = &'r Arc<Record>>,
    ) -> SearchOutcome {
        let metric = self.field.metric;
        let mut scanned = 0usize;
        let mut candidates: Vec<(f32, &'r Arc<Record>)> = Vec::new();

        for record in records {
            scanned += 1;
            if let Some(filter) = &self.filter {
                if !filter.matches(record) {
                    continue;
                }
            }
            let Some(vector) = record.vector(&self.field.name) else {
                continue;
            };
            let score = normalize_zero(distance::score(metric, self.query, vector));
            if let Some(threshold) = self.min_score {
                if best_first(metric, score, threshold) == Ordering::Greater {
                    continue;
                }
            }
            candidates.push((score, record));
        }
        let matched = candidates.len();

        let order = |a: &(f32, &'r Arc<Record>), b: &(f32, &'r Arc<Record>)| {
            best_first(metric, a.0, b.0).then_with(|| a.1.key().cmp(b.1.key()))
        };
        if candidates.len() > self.top_k {
            candidates.select_nth_unstable_by(self.top_k - 1, order);
            candidates.truncate(self.top_k);
        }
        candidates.sort_unstable_by(order);

        let results = candidates
            .into_iter()
            .map(|(score, record)| SearchResult {
                record: Record::clone(record),
                score,
            })
            .collect();

        SearchOutcome {
            results,
            scanned,
            matched,
        }
    }
}

// -0.0 and 0.0 must tie so the key decides
fn normalize_zero(score: f32) -> f32 {
    if score == 0.0 {
        0.0
    } else {
        score
    }
}

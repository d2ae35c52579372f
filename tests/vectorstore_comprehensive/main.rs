//! VectorStore Comprehensive Test Suite
//!
//! Tests organized by functionality:
//! - basic_ops: CRUD operations (upsert, get, delete)
//! - batch: Batch operations (upsert_many, get_many, delete_many)
//! - collections: Registry management (get_or_create, list, drop, limits)
//! - search: Top-K ranking across metrics
//! - filter: Filter binding and evaluation
//! - concurrency: Thread safety
//! - edge_cases: Validation and boundary conditions
//! - typed: Collections bound to application record types
//! - ingest: Embedding fan-out and gather-then-upsert
//! - properties: Randomized invariants (proptest)

pub use stratavec::prelude::*;
pub use stratavec::VectorError;

mod batch;
mod collections;
mod filter;
mod ingest;
mod properties;

/// Glossary schema: u64 key, indexed category, term, definition, 3-dim vector.
pub fn glossary_schema(metric: DistanceMetric) -> CollectionSchema {
    CollectionSchema::builder("id", KeyType::U64)
        .indexed_field("category", FieldType::String)
        .field("term", FieldType::String)
        .field("definition", FieldType::String)
        .vector("embedding", 3, metric)
        .build()
        .unwrap()
}

/// Fresh live collection named `name` with the cosine glossary schema.
pub fn glossary(store: &VectorStore, name: &str) -> Collection {
    glossary_with(store, name, DistanceMetric::Cosine)
}

/// Fresh live collection with the glossary schema and the given metric.
pub fn glossary_with(store: &VectorStore, name: &str, metric: DistanceMetric) -> Collection {
    let c = store
        .get_or_create_collection(name, glossary_schema(metric))
        .unwrap();
    c.ensure_exists().unwrap();
    c
}

/// Glossary record.
pub fn entry(id: u64, category: &str, term: &str, embedding: [f32; 3]) -> Record {
    Record::new(id)
        .with_field("category", category)
        .with_field("term", term)
        .with_field("definition", format!("definition of {}", term))
        .with_vector("embedding", embedding.to_vec())
}

/// The three-record glossary used across suites.
pub fn seed(c: &Collection) {
    c.upsert(entry(1, "Ext", "API", [1.0, 0.0, 0.0])).unwrap();
    c.upsert(entry(2, "Core", "Conn", [0.0, 1.0, 0.0])).unwrap();
    c.upsert(entry(3, "Ext", "RAG", [0.9, 0.1, 0.0])).unwrap();
}

/// Keys of search results as u64.
pub fn ids(results: &[SearchResult]) -> Vec<u64> {
    results.iter().map(|r| r.key().as_u64().unwrap()).collect()
}

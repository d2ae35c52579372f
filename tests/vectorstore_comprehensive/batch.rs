//! Collection Batch Operations Tests
//!
//! Tests for batch operations:
//! - upsert_many
//! - get_many
//! - delete_many

use crate::*;

// =============================================================================
// Batch Upsert Tests
// =============================================================================

/// Test basic batch upsert
#[test]
fn test_upsert_many_basic() {
    let store = VectorStore::new();
    let c = glossary(&store, "batch");

    let outcomes = c
        .upsert_many(vec![
            entry(1, "Ext", "API", [1.0, 0.0, 0.0]),
            entry(2, "Core", "Conn", [0.0, 1.0, 0.0]),
            entry(3, "Ext", "RAG", [0.9, 0.1, 0.0]),
        ])
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes.iter().all(|o| o.is_ok()));
    assert_eq!(c.len().unwrap(), 3);
}

/// Test per-record outcomes in input order
#[test]
fn test_upsert_many_partial_failure() {
    let store = VectorStore::new();
    let c = glossary(&store, "batch");

    let outcomes = c
        .upsert_many(vec![
            entry(1, "Ext", "API", [1.0, 0.0, 0.0]),
            entry(2, "Core", "Conn", [0.0, 1.0, 0.0]).with_vector("embedding", vec![0.0, 1.0]),
            Record::new("wrong-key-type")
                .with_field("category", "Ext")
                .with_field("term", "x")
                .with_field("definition", "y")
                .with_vector("embedding", vec![1.0, 0.0, 0.0]),
            entry(4, "Ext", "RAG", [0.9, 0.1, 0.0]),
        ])
        .unwrap();

    assert_eq!(outcomes[0], Ok(RecordKey::U64(1)));
    assert!(matches!(
        outcomes[1],
        Err(VectorError::DimensionMismatch { expected: 3, got: 2 })
    ));
    assert!(matches!(outcomes[2], Err(VectorError::InvalidRecord { .. })));
    assert_eq!(outcomes[3], Ok(RecordKey::U64(4)));

    assert_eq!(c.keys().unwrap(), vec![RecordKey::U64(1), RecordKey::U64(4)]);
}

/// Test duplicate keys in one batch: last write wins
#[test]
fn test_upsert_many_duplicate_keys() {
    let store = VectorStore::new();
    let c = glossary(&store, "batch");

    c.upsert_many(vec![
        entry(1, "Ext", "first", [1.0, 0.0, 0.0]),
        entry(1, "Core", "second", [0.0, 1.0, 0.0]),
    ])
    .unwrap();

    let fetched = c.get(1u64).unwrap().unwrap();
    assert_eq!(fetched.field("term").and_then(|v| v.as_str()), Some("second"));
    assert_eq!(c.len().unwrap(), 1);
}

/// Test empty batch
#[test]
fn test_upsert_many_empty() {
    let store = VectorStore::new();
    let c = glossary(&store, "batch");
    assert!(c.upsert_many(Vec::new()).unwrap().is_empty());
    assert!(c.is_empty().unwrap());
}

/// Test batch upsert on a collection that was never ensured
#[test]
fn test_upsert_many_requires_live_collection() {
    let store = VectorStore::new();
    let c = store
        .get_or_create_collection("pending", glossary_schema(DistanceMetric::Cosine))
        .unwrap();
    let result = c.upsert_many(vec![entry(1, "Ext", "API", [1.0, 0.0, 0.0])]);
    assert!(matches!(result, Err(VectorError::CollectionNotFound { .. })));
}

// =============================================================================
// Batch Read/Delete Tests
// =============================================================================

/// Test get_many keeps one slot per requested key
#[test]
fn test_get_many() {
    let store = VectorStore::new();
    let c = glossary(&store, "batch");
    seed(&c);

    let got = c
        .get_many(vec![RecordKey::U64(3), RecordKey::U64(8), RecordKey::U64(1)])
        .unwrap();
    assert_eq!(got.len(), 3);
    assert_eq!(got[0].as_ref().map(|r| r.key().clone()), Some(RecordKey::U64(3)));
    assert!(got[1].is_none());
    assert_eq!(got[2].as_ref().map(|r| r.key().clone()), Some(RecordKey::U64(1)));
}

/// Test delete_many counts removals
#[test]
fn test_delete_many() {
    let store = VectorStore::new();
    let c = glossary(&store, "batch");
    seed(&c);

    let removed = c
        .delete_many(vec![RecordKey::U64(1), RecordKey::U64(1), RecordKey::U64(5)])
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(c.keys().unwrap(), vec![RecordKey::U64(2), RecordKey::U64(3)]);
}

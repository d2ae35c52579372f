//! Filter Tests
//!
//! Tests for filter binding and evaluation through search:
//! - equality, comparisons, boolean combinators
//! - null handling
//! - rejection of unknown, unindexed and mistyped fields

use crate::*;

fn catalog(store: &VectorStore) -> Collection {
    let schema = CollectionSchema::builder("id", KeyType::U64)
        .indexed_field("category", FieldType::String)
        .indexed_field("year", FieldType::Int)
        .indexed_field("rating", FieldType::Float)
        .indexed_field("stable", FieldType::Bool)
        .field("notes", FieldType::String)
        .vector("embedding", 2, DistanceMetric::Cosine)
        .build()
        .unwrap();
    let c = store.get_or_create_collection("catalog", schema).unwrap();
    c.ensure_exists().unwrap();

    let rows: [(u64, &str, Option<i64>, f64, bool); 5] = [
        (1, "Ext", Some(2019), 4.5, true),
        (2, "Core", Some(2021), 3.0, true),
        (3, "Ext", Some(2023), 2.5, false),
        (4, "Data", None, 5.0, false),
        (5, "Core", Some(2023), 4.0, true),
    ];
    for (id, category, year, rating, stable) in rows {
        c.upsert(
            Record::new(id)
                .with_field("category", category)
                .with_field("year", year)
                .with_field("rating", rating)
                .with_field("stable", stable)
                .with_field("notes", "n/a")
                .with_vector("embedding", vec![1.0, id as f32]),
        )
        .unwrap();
    }
    c
}

fn matching(c: &Collection, filter: Filter) -> Vec<u64> {
    let mut found = ids(&c.search(&[1.0, 0.0], 100, Some(&filter)).unwrap());
    found.sort_unstable();
    found
}

// =============================================================================
// Evaluation Tests
// =============================================================================

#[test]
fn test_eq_per_type() {
    let store = VectorStore::new();
    let c = catalog(&store);
    assert_eq!(matching(&c, Filter::eq("category", "Core")), vec![2, 5]);
    assert_eq!(matching(&c, Filter::eq("year", 2023i64)), vec![3, 5]);
    assert_eq!(matching(&c, Filter::eq("rating", 4.5f64)), vec![1]);
    assert_eq!(matching(&c, Filter::eq("stable", false)), vec![3, 4]);
}

#[test]
fn test_int_literal_widens_on_float_field() {
    let store = VectorStore::new();
    let c = catalog(&store);
    assert_eq!(matching(&c, Filter::eq("rating", 5i64)), vec![4]);
    assert_eq!(matching(&c, Filter::ge("rating", 4i64)), vec![1, 4, 5]);
}

#[test]
fn test_comparisons() {
    let store = VectorStore::new();
    let c = catalog(&store);
    assert_eq!(matching(&c, Filter::lt("year", 2021i64)), vec![1]);
    assert_eq!(matching(&c, Filter::le("year", 2021i64)), vec![1, 2]);
    assert_eq!(matching(&c, Filter::gt("year", 2021i64)), vec![3, 5]);
    assert_eq!(matching(&c, Filter::ge("category", "Data")), vec![1, 3, 4]);
}

#[test]
fn test_null_semantics() {
    let store = VectorStore::new();
    let c = catalog(&store);
    // Null only equals a Null literal and never compares
    assert_eq!(matching(&c, Filter::eq("year", FieldValue::Null)), vec![4]);
    assert!(!matching(&c, Filter::ge("year", 0i64)).contains(&4));
    assert!(matching(&c, Filter::not(Filter::ge("year", 0i64))).contains(&4));
}

#[test]
fn test_boolean_combinators() {
    let store = VectorStore::new();
    let c = catalog(&store);

    let ext_or_data = Filter::or([Filter::eq("category", "Ext"), Filter::eq("category", "Data")]);
    assert_eq!(matching(&c, ext_or_data.clone()), vec![1, 3, 4]);

    let stable_ext = Filter::eq("category", "Ext").and_eq("stable", true);
    assert_eq!(matching(&c, stable_ext), vec![1]);

    let not_core = Filter::not(Filter::eq("category", "Core"));
    assert_eq!(matching(&c, not_core), vec![1, 3, 4]);

    let nested = Filter::and([ext_or_data, Filter::not(Filter::eq("stable", true))]);
    assert_eq!(matching(&c, nested), vec![3, 4]);
}

#[test]
fn test_empty_combinators() {
    let store = VectorStore::new();
    let c = catalog(&store);
    assert_eq!(matching(&c, Filter::and(Vec::new())), vec![1, 2, 3, 4, 5]);
    assert!(matching(&c, Filter::or(Vec::new())).is_empty());
}

#[test]
fn test_filter_serde_roundtrip() {
    let filter = Filter::and([
        Filter::eq("category", "Ext"),
        Filter::not(Filter::lt("year", 2020i64)),
    ]);
    let json = serde_json::to_string(&filter).unwrap();
    let back: Filter = serde_json::from_str(&json).unwrap();
    assert_eq!(back, filter);
}

// =============================================================================
// Binding Tests
// =============================================================================

#[test]
fn test_rejected_filters() {
    let store = VectorStore::new();
    let c = catalog(&store);
    let query = [1.0, 0.0];

    let rejected = [
        Filter::eq("missing", 1i64),
        Filter::eq("notes", "n/a"),
        Filter::eq("year", "2023"),
        Filter::eq("category", 3i64),
        Filter::gt("stable", true),
        Filter::lt("year", FieldValue::Null),
        Filter::or([Filter::eq("category", "Ext"), Filter::eq("notes", "x")]),
    ];
    for filter in rejected {
        let err = c.search(&query, 5, Some(&filter)).unwrap_err();
        assert!(
            matches!(err, VectorError::InvalidFilterField { .. }),
            "{:?} gave {:?}",
            filter,
            err
        );
    }
}

#[test]
fn test_filter_rejected_even_when_empty() {
    let store = VectorStore::new();
    let schema = glossary_schema(DistanceMetric::Cosine);
    let c = store.get_or_create_collection("empty", schema).unwrap();
    c.ensure_exists().unwrap();
    assert!(c
        .search(&[1.0, 0.0, 0.0], 1, Some(&Filter::eq("term", "API")))
        .is_err());
}

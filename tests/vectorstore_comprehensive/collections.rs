//! VectorStore Collection Management Tests
//!
//! Tests for registry operations:
//! - get_or_create_collection
//! - ensure_exists
//! - collection / list_collections
//! - drop_collection
//! - store limits

use crate::*;

/// Test ensure_exists twice: no error, one collection
#[test]
fn test_ensure_exists_twice() {
    let store = VectorStore::new();
    let c = store
        .get_or_create_collection("glossary", glossary_schema(DistanceMetric::Cosine))
        .unwrap();
    c.ensure_exists().unwrap();
    c.ensure_exists().unwrap();

    let again = store
        .get_or_create_collection("glossary", glossary_schema(DistanceMetric::Cosine))
        .unwrap();
    again.ensure_exists().unwrap();

    assert_eq!(store.list_collections().len(), 1);
    assert!(again.same_as(&c));
}

/// Test operations before ensure_exists
#[test]
fn test_operations_before_ensure_exists() {
    let store = VectorStore::new();
    let c = store
        .get_or_create_collection("glossary", glossary_schema(DistanceMetric::Cosine))
        .unwrap();

    assert!(!c.exists());
    assert!(c.get(1u64).unwrap_err().is_not_found());
    assert!(c
        .upsert(entry(1, "Ext", "API", [1.0, 0.0, 0.0]))
        .unwrap_err()
        .is_not_found());
    assert!(c.search(&[1.0, 0.0, 0.0], 1, None).unwrap_err().is_not_found());
}

/// Test a re-registration with a different schema
#[test]
fn test_schema_fixed_at_first_registration() {
    let store = VectorStore::new();
    glossary(&store, "glossary");

    let result = store.get_or_create_collection("glossary", glossary_schema(DistanceMetric::Euclidean));
    assert!(matches!(result, Err(VectorError::SchemaMismatch { .. })));

    // Original collection untouched
    let c = store.collection("glossary").unwrap();
    assert_eq!(c.schema().default_vector_field().metric, DistanceMetric::Cosine);
}

/// Test independent collections do not share records
#[test]
fn test_collections_are_isolated() {
    let store = VectorStore::new();
    let a = glossary(&store, "a");
    let b = glossary(&store, "b");
    seed(&a);

    assert_eq!(a.len().unwrap(), 3);
    assert!(b.is_empty().unwrap());
}

/// Test listing is sorted and reports counts
#[test]
fn test_list_collections() {
    let store = VectorStore::new();
    let z = glossary(&store, "zeta");
    glossary(&store, "alpha");
    seed(&z);

    let infos = store.list_collections();
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0].name, "alpha");
    assert_eq!(infos[0].count, 0);
    assert_eq!(infos[1].name, "zeta");
    assert_eq!(infos[1].count, 3);
}

/// Test drop invalidates handles and frees the name
#[test]
fn test_drop_collection() {
    let store = VectorStore::new();
    let c = glossary(&store, "glossary");
    seed(&c);

    assert!(store.drop_collection("glossary"));
    assert!(store.collection("glossary").is_none());
    assert!(c.get(1u64).unwrap_err().is_not_found());
    assert!(store.list_collections().is_empty());

    let fresh = glossary(&store, "glossary");
    assert!(fresh.is_empty().unwrap());
}

/// Test configured limits
#[test]
fn test_store_limits_from_toml() {
    let config = StoreConfig::from_toml_str(
        r#"
        max_dimension = 4
        max_top_k = 2
        max_collections = 1
        "#,
    )
    .unwrap();
    let store = VectorStore::with_config(config).unwrap();

    let c = glossary(&store, "glossary");
    seed(&c);
    assert_eq!(c.search(&[1.0, 0.0, 0.0], 2, None).unwrap().len(), 2);
    assert!(matches!(
        c.search(&[1.0, 0.0, 0.0], 3, None),
        Err(VectorError::InvalidTopK { k: 3, max: 2 })
    ));

    assert!(matches!(
        store.get_or_create_collection("second", glossary_schema(DistanceMetric::Cosine)),
        Err(VectorError::CapacityExceeded { .. })
    ));

    let wide = CollectionSchema::builder("id", KeyType::U64)
        .vector("embedding", 5, DistanceMetric::Cosine)
        .build()
        .unwrap();
    assert!(store.drop_collection("glossary"));
    assert!(matches!(
        store.get_or_create_collection("wide", wide),
        Err(VectorError::InvalidSchema { .. })
    ));
}

/// Test the unified error sees collection errors
#[test]
fn test_facade_error_conversion() {
    fn lookup(store: &VectorStore) -> stratavec::Result<usize> {
        let c = store.get_or_create_collection("glossary", glossary_schema(DistanceMetric::Cosine))?;
        Ok(c.len()?)
    }
    let err = lookup(&VectorStore::new()).unwrap_err();
    assert!(err.is_not_found());
}

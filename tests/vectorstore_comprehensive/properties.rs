//! Property Tests
//!
//! Randomized invariants checked with proptest:
//! - search returns at most top_k results, best-first, ties by key
//! - the best result matches a brute-force scan
//! - filtered search returns only matching records
//! - round-trip equality after arbitrary upserts

use crate::*;
use proptest::prelude::*;
use std::cmp::Ordering;
use rand::{rngs::StdRng, Rng, SeedableRng};

const DIM: usize = 4;

fn metric_strategy() -> impl Strategy<Value = DistanceMetric> {
    prop_oneof![
        Just(DistanceMetric::Cosine),
        Just(DistanceMetric::Euclidean),
        Just(DistanceMetric::DotProduct),
    ]
}

fn vector_strategy() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, DIM)
}

fn collection(metric: DistanceMetric) -> Collection {
    let schema = CollectionSchema::builder("id", KeyType::U64)
        .indexed_field("bucket", FieldType::Int)
        .vector("embedding", DIM, metric)
        .build()
        .unwrap();
    let store = VectorStore::new();
    let c = store.get_or_create_collection("props", schema).unwrap();
    c.ensure_exists().unwrap();
    c
}

fn record(id: u64, bucket: i64, v: Vec<f32>) -> Record {
    Record::new(id)
        .with_field("bucket", bucket)
        .with_vector("embedding", v)
}

fn score(metric: DistanceMetric, a: &[f32], b: &[f32]) -> f32 {
    stratavec::similarity(metric, a, b).unwrap()
}

proptest! {
    #[test]
    fn prop_search_ordered_and_bounded(
        metric in metric_strategy(),
        vectors in prop::collection::vec(vector_strategy(), 0..40),
        query in vector_strategy(),
        top_k in 1usize..20,
    ) {
        let c = collection(metric);
        for (i, v) in vectors.iter().enumerate() {
            c.upsert(record(i as u64, (i % 3) as i64, v.clone())).unwrap();
        }

        let results = c.search(&query, top_k, None).unwrap();
        prop_assert_eq!(results.len(), top_k.min(vectors.len()));

        for w in results.windows(2) {
            let order = stratavec::best_first(metric, w[0].score, w[1].score);
            prop_assert!(order != Ordering::Greater);
            if order == Ordering::Equal {
                prop_assert!(w[0].key() < w[1].key());
            }
        }

        // Best result agrees with a brute-force scan
        if let Some(first) = results.first() {
            let best = vectors
                .iter()
                .map(|v| score(metric, &query, v))
                .fold(None::<f32>, |acc, s| match acc {
                    None => Some(s),
                    Some(a) if stratavec::best_first(metric, s, a) == Ordering::Less => Some(s),
                    keep => keep,
                });
            prop_assert_eq!(Some(first.score), best);
        }
    }

    #[test]
    fn prop_filter_only_returns_matches(
        vectors in prop::collection::vec(vector_strategy(), 1..30),
        query in vector_strategy(),
        bucket in 0i64..3,
    ) {
        let c = collection(DistanceMetric::Euclidean);
        for (i, v) in vectors.iter().enumerate() {
            c.upsert(record(i as u64, (i % 3) as i64, v.clone())).unwrap();
        }

        let filter = Filter::eq("bucket", bucket);
        let results = c.search(&query, vectors.len(), Some(&filter)).unwrap();
        let expected = (0..vectors.len()).filter(|i| (i % 3) as i64 == bucket).count();
        prop_assert_eq!(results.len(), expected);
        for r in &results {
            prop_assert_eq!(r.record.field("bucket"), Some(&FieldValue::Int(bucket)));
        }
    }

    #[test]
    fn prop_upsert_get_roundtrip(
        entries in prop::collection::vec((0u64..20, vector_strategy()), 1..40),
    ) {
        let c = collection(DistanceMetric::Cosine);
        let mut last = std::collections::BTreeMap::new();
        for (id, v) in &entries {
            let r = record(*id, 0, v.clone());
            c.upsert(r.clone()).unwrap();
            last.insert(*id, r);
        }

        prop_assert_eq!(c.len().unwrap(), last.len());
        for (id, r) in &last {
            let got = c.get(*id).unwrap();
            prop_assert_eq!(got.as_ref(), Some(r));
        }
    }
}

/// Randomized fixture: an exact copy of a stored vector ranks first
#[test]
fn test_exact_match_ranks_first_randomized() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for metric in [DistanceMetric::Cosine, DistanceMetric::Euclidean] {
        let c = collection(metric);
        let vectors: Vec<Vec<f32>> = (0..200)
            .map(|_| (0..DIM).map(|_| rng.gen_range(-1.0f32..1.0)).collect())
            .collect();
        for (i, v) in vectors.iter().enumerate() {
            c.upsert(record(i as u64, 0, v.clone())).unwrap();
        }

        for target in [0usize, 57, 199] {
            let results = c.search(&vectors[target], 1, None).unwrap();
            assert_eq!(results[0].key(), &RecordKey::U64(target as u64), "{:?}", metric);
            match metric {
                DistanceMetric::Euclidean => assert_eq!(results[0].score, 0.0),
                _ => assert!((results[0].score - 1.0).abs() < 1e-6),
            }
        }
    }
}

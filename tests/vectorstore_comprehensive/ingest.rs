//! Ingestion Tests
//!
//! Embedding fan-out, the gather-then-upsert barrier and text search.

use crate::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use stratavec::{embed_all, search_text, EmbedError, IngestError};

fn text_glossary(store: &VectorStore, dimension: usize) -> Collection {
    let schema = CollectionSchema::builder("id", KeyType::U64)
        .indexed_field("category", FieldType::String)
        .field("term", FieldType::String)
        .vector("embedding", dimension, DistanceMetric::Cosine)
        .build()
        .unwrap();
    let c = store.get_or_create_collection("text", schema).unwrap();
    c.ensure_exists().unwrap();
    c
}

fn pending(id: u64, category: &str, text: &str) -> PendingRecord {
    PendingRecord::new(
        Record::new(id)
            .with_field("category", category)
            .with_field("term", text),
        "embedding",
        text,
    )
}

/// Embedder that counts calls and rejects texts containing "reject"
struct Counting {
    inner: HashingEmbedder,
    calls: AtomicUsize,
}

impl Embedder for Counting {
    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, EmbedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.contains("reject") {
            return Err(EmbedError::Failed {
                reason: "rejected".into(),
            });
        }
        self.inner.embed(text)
    }
}

#[test]
fn test_ingest_then_search_text() {
    let store = VectorStore::new();
    let c = text_glossary(&store, 128);
    let embedder = HashingEmbedder::new(128).unwrap();

    let outcomes = Ingestor::new(3).ingest(
        &c,
        &embedder,
        vec![
            pending(1, "Ext", "extension point contribution"),
            pending(2, "Core", "service registry lookup"),
            pending(3, "Ext", "extension manifest metadata"),
            pending(4, "Data", "entity repository"),
        ],
    );
    assert!(outcomes.iter().all(|o| o.is_ok()));
    assert_eq!(c.len().unwrap(), 4);

    let hits = search_text(&c, &embedder, "service registry lookup", 1, None).unwrap();
    assert_eq!(hits[0].key(), &RecordKey::U64(2));

    let ext = Filter::eq("category", "Ext");
    let hits = search_text(&c, &embedder, "extension", 10, Some(&ext)).unwrap();
    let mut found = ids(&hits);
    found.sort_unstable();
    assert_eq!(found, vec![1, 3]);
}

#[test]
fn test_ingest_embeds_every_record_once() {
    let store = VectorStore::new();
    let c = text_glossary(&store, 32);
    let embedder = Counting {
        inner: HashingEmbedder::new(32).unwrap(),
        calls: AtomicUsize::new(0),
    };

    let batch: Vec<_> = (0..40u64)
        .map(|i| {
            let text = if i % 10 == 0 {
                format!("reject {}", i)
            } else {
                format!("term number {}", i)
            };
            pending(i, "Ext", &text)
        })
        .collect();

    let outcomes = Ingestor::new(4).ingest(&c, &embedder, batch);
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 40);
    assert_eq!(outcomes.len(), 40);

    for (i, outcome) in outcomes.iter().enumerate() {
        if i % 10 == 0 {
            assert!(matches!(outcome, Err(IngestError::Embed(_))), "record {}", i);
        } else {
            assert_eq!(outcome, &Ok(RecordKey::U64(i as u64)));
        }
    }
    assert_eq!(c.len().unwrap(), 36);
}

#[test]
fn test_embed_all_order_and_errors() {
    let embedder = HashingEmbedder::new(16).unwrap();
    let texts = ["alpha", "", "beta gamma", "alpha"];
    let out = embed_all(&embedder, &texts, 8);

    assert_eq!(out.len(), 4);
    assert_eq!(out[1], Err(EmbedError::EmptyInput));
    assert_eq!(out[0], out[3]);
    assert_eq!(out[2].as_ref().unwrap(), &embedder.embed("beta gamma").unwrap());
}

#[test]
fn test_ingest_errors_convert_to_facade_error() {
    let store = VectorStore::new();
    let c = text_glossary(&store, 16);
    let embedder = HashingEmbedder::new(16).unwrap();

    let outcomes = Ingestor::new(1).ingest(&c, &embedder, vec![pending(1, "Ext", "...")]);
    let err: stratavec::Error = outcomes.into_iter().next().unwrap().unwrap_err().into();
    assert!(err.is_embedding());
}

//! Glossary loading and ingestion.

use serde::{Deserialize, Serialize};
use std::path::Path;
use stratavec_core::{CollectionSchema, DistanceMetric, FieldType, KeyType, Record, StoreConfig};
use stratavec_intelligence::{Embedder, Ingestor, PendingRecord};
use stratavec_primitives::{Collection, VectorStore};
use tracing::warn;

/// Collection the CLI loads the glossary into.
pub const COLLECTION: &str = "glossary";

const SAMPLE: &str = include_str!("../data/glossary.json");

/// One glossary entry as read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
    pub category: String,
}

impl GlossaryEntry {
    /// Text that gets embedded for this entry.
    pub fn embedding_text(&self) -> String {
        format!("{}: {}", self.term, self.definition)
    }
}

/// Read entries from `path`, or the built-in sample when `None`.
pub fn load_entries(path: Option<&str>) -> Result<Vec<GlossaryEntry>, String> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
            parse_entries(&text).map_err(|e| format!("Invalid glossary '{}': {}", path, e))
        }
        None => parse_entries(SAMPLE).map_err(|e| format!("Invalid built-in glossary: {}", e)),
    }
}

fn parse_entries(text: &str) -> Result<Vec<GlossaryEntry>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Open a store, honouring `--config` when given.
pub fn open_store(config: Option<&str>) -> Result<VectorStore, String> {
    let config = match config {
        Some(path) => StoreConfig::from_file(Path::new(path)).map_err(|e| e.to_string())?,
        None => StoreConfig::default(),
    };
    VectorStore::with_config(config).map_err(|e| e.to_string())
}

/// Schema of the glossary collection.
pub fn schema(dimension: usize) -> Result<CollectionSchema, String> {
    CollectionSchema::builder("id", KeyType::U64)
        .field("term", FieldType::String)
        .field("definition", FieldType::String)
        .indexed_field("category", FieldType::String)
        .vector("embedding", dimension, DistanceMetric::Cosine)
        .build()
        .map_err(|e| e.to_string())
}

/// Create the glossary collection and ingest every entry.
///
/// Entries that fail to embed or store are logged and skipped.
pub fn load_collection<E: Embedder>(
    store: &VectorStore,
    entries: &[GlossaryEntry],
    embedder: &E,
) -> Result<Collection, String> {
    let collection = store
        .get_or_create_collection(COLLECTION, schema(embedder.dimension())?)
        .map_err(|e| e.to_string())?;
    collection.ensure_exists().map_err(|e| e.to_string())?;

    let pending = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let record = Record::new(i as u64 + 1)
                .with_field("term", entry.term.as_str())
                .with_field("definition", entry.definition.as_str())
                .with_field("category", entry.category.as_str());
            PendingRecord::new(record, "embedding", entry.embedding_text())
        })
        .collect();

    for (entry, outcome) in entries
        .iter()
        .zip(Ingestor::default().ingest(&collection, embedder, pending))
    {
        if let Err(e) = outcome {
            warn!(term = %entry.term, error = %e, "skipped glossary entry");
        }
    }
    Ok(collection)
}

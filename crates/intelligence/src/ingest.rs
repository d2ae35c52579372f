//! Gather-then-upsert ingestion.
//!
//! Embedding is the slow step, so [`Ingestor::ingest`] runs it across scoped
//! worker threads and waits for every embedding before touching the
//! collection. All records whose text embedded successfully are then written
//! with one `upsert_many`, and per-record outcomes come back in input order.

use crate::embed::{embed_checked, EmbedError, Embedder};
use stratavec_core::{Record, RecordKey, VectorError};
use stratavec_primitives::{Collection, Filter, SearchResult};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failure of a single ingested record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    /// The text could not be embedded
    #[error(transparent)]
    Embed(#[from] EmbedError),

    /// The collection rejected the record
    #[error(transparent)]
    Store(#[from] VectorError),
}

/// A record waiting for one of its vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRecord {
    /// Record with every field except `vector_field`
    pub record: Record,

    /// Vector field to fill from the embedding
    pub vector_field: String,

    /// Text to embed
    pub text: String,
}

impl PendingRecord {
    /// Create a pending record.
    pub fn new(record: Record, vector_field: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            record,
            vector_field: vector_field.into(),
            text: text.into(),
        }
    }
}

/// Embed many texts concurrently.
///
/// Work is split into contiguous chunks over at most `parallelism` scoped
/// threads. Results keep input order. A panicking worker fails every text in
/// its chunk with `EmbedError::Failed` instead of unwinding into the caller.
pub fn embed_all<E, S>(
    embedder: &E,
    texts: &[S],
    parallelism: usize,
) -> Vec<Result<Vec<f32>, EmbedError>>
where
    E: Embedder + ?Sized,
    S: AsRef<str> + Sync,
{
    if texts.is_empty() {
        return Vec::new();
    }

    let workers = parallelism.clamp(1, texts.len());
    let chunk_size = (texts.len() + workers - 1) / workers;
    debug!(texts = texts.len(), workers, "embedding batch");

    std::thread::scope(|scope| {
        let handles: Vec<_> = texts
            .chunks(chunk_size)
            .map(|chunk| {
                let handle = scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|text| embed_checked(embedder, text.as_ref()))
                        .collect::<Vec<_>>()
                });
                (chunk.len(), handle)
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|(len, handle)| {
                handle.join().unwrap_or_else(|_| {
                    vec![
                        Err(EmbedError::Failed {
                            reason: "embedding worker panicked".to_string(),
                        });
                        len
                    ]
                })
            })
            .collect()
    })
}

/// Embeds pending records and stores them in one batch.
#[derive(Debug, Clone)]
pub struct Ingestor {
    parallelism: usize,
}

impl Default for Ingestor {
    fn default() -> Self {
        let parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self::new(parallelism)
    }
}

impl Ingestor {
    /// Create an ingestor using at most `parallelism` embedding threads.
    pub fn new(parallelism: usize) -> Self {
        Self {
            parallelism: parallelism.max(1),
        }
    }

    /// Worker thread cap.
    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Embed every pending record, then upsert the successes together.
    ///
    /// Returns one outcome per input, in input order. Records whose text
    /// failed to embed are never written.
    pub fn ingest<E: Embedder + ?Sized>(
        &self,
        collection: &Collection,
        embedder: &E,
        pending: Vec<PendingRecord>,
    ) -> Vec<Result<RecordKey, IngestError>> {
        let total = pending.len();
        let texts: Vec<&str> = pending.iter().map(|p| p.text.as_str()).collect();
        let embeddings = embed_all(embedder, &texts, self.parallelism);

        let mut outcomes: Vec<Option<Result<RecordKey, IngestError>>> = Vec::with_capacity(total);
        let mut slots = Vec::new();
        let mut batch = Vec::new();

        for (pending, embedding) in pending.into_iter().zip(embeddings) {
            match embedding {
                Ok(vector) => {
                    let mut record = pending.record;
                    record.set_vector(pending.vector_field, vector);
                    slots.push(outcomes.len());
                    batch.push(record);
                    outcomes.push(None);
                }
                Err(e) => outcomes.push(Some(Err(IngestError::Embed(e)))),
            }
        }

        let embedded = batch.len();
        match collection.upsert_many(batch) {
            Ok(results) => {
                for (slot, result) in slots.into_iter().zip(results) {
                    outcomes[slot] = Some(result.map_err(IngestError::Store));
                }
            }
            Err(e) => {
                for slot in slots {
                    outcomes[slot] = Some(Err(IngestError::Store(e.clone())));
                }
            }
        }

        let outcomes: Vec<_> = outcomes.into_iter().flatten().collect();
        for (index, outcome) in outcomes.iter().enumerate() {
            if let Err(e) = outcome {
                warn!(collection = collection.name(), index, error = %e, "record not ingested");
            }
        }
        let stored = outcomes.iter().filter(|o| o.is_ok()).count();
        info!(
            collection = collection.name(),
            total,
            embedded,
            stored,
            failed = total - stored,
            "ingested records"
        );
        outcomes
    }
}

/// Embed `text` and search the collection's default vector field.
pub fn search_text<E: Embedder + ?Sized>(
    collection: &Collection,
    embedder: &E,
    text: &str,
    top_k: usize,
    filter: Option<&Filter>,
) -> Result<Vec<SearchResult>, IngestError> {
    let query = embed_checked(embedder, text)?;
    Ok(collection.search(&query, top_k, filter)?)
}

//! Embedding boundary and ingestion for stratavec
//!
//! - [`Embedder`]: text to vector, implemented by callers
//! - [`embed_all`]: bounded fan-out over scoped threads, order-preserving
//! - [`Ingestor`]: embed everything first, then one batch upsert
//! - [`search_text`]: embed a query and search
//! - [`HashingEmbedder`]: deterministic lexical embedder for demos and tests

#![warn(missing_docs)]

pub mod embed;
pub mod ingest;

pub use embed::{embed_checked, EmbedError, Embedder, HashingEmbedder};
pub use ingest::{embed_all, search_text, IngestError, Ingestor, PendingRecord};

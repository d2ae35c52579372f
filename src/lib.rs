//! # stratavec
//!
//! In-memory vector store with typed schemas, filtered top-K search and a
//! pluggable embedding boundary.
//!
//! ## Quick Start
//!
//! ```
//! use stratavec::prelude::*;
//!
//! # fn main() -> stratavec::Result<()> {
//! let schema = CollectionSchema::builder("id", KeyType::U64)
//!     .field("term", FieldType::String)
//!     .indexed_field("category", FieldType::String)
//!     .vector("embedding", 3, DistanceMetric::Cosine)
//!     .build()?;
//!
//! let store = VectorStore::new();
//! let glossary = store.get_or_create_collection("glossary", schema)?;
//! glossary.ensure_exists()?;
//!
//! glossary.upsert(
//!     Record::new(1u64)
//!         .with_field("term", "Extension Point")
//!         .with_field("category", "Ext")
//!         .with_vector("embedding", vec![1.0, 0.0, 0.0]),
//! )?;
//!
//! let filter = Filter::eq("category", "Ext");
//! let hits = glossary.search(&[1.0, 0.0, 0.0], 5, Some(&filter))?;
//! assert_eq!(hits[0].key(), &RecordKey::U64(1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! - `stratavec-core`: schemas, records, values, errors, config
//! - `stratavec-primitives`: [`VectorStore`], [`Collection`], [`Filter`], search
//! - `stratavec-intelligence`: [`Embedder`], [`Ingestor`], [`HashingEmbedder`]
//!
//! Crate-level errors convert into the unified [`Error`].

#![warn(missing_docs)]

mod error;

pub mod prelude;

pub use error::{Error, Result};

pub use stratavec_core::{
    CollectionSchema, CollectionSchemaBuilder, DataFieldSpec, DistanceMetric, FieldType,
    FieldValue, KeyFieldSpec, KeyType, Record, RecordKey, StoreConfig, VectorError,
    VectorFieldSpec, VectorRecord, VectorResult,
};

pub use stratavec_primitives::vector::{
    best_first, cosine_similarity, dot_product, euclidean_distance, similarity,
};
pub use stratavec_primitives::{
    CmpOp, Collection, CollectionInfo, Filter, SearchRequest, SearchResult, TypedCollection,
    TypedMatch, VectorStore, VectorStoreBuilder,
};

pub use stratavec_intelligence::{
    embed_all, search_text, EmbedError, Embedder, HashingEmbedder, IngestError, Ingestor,
    PendingRecord,
};

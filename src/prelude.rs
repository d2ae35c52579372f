//! Convenient imports for stratavec.
//!
//! ```ignore
//! use stratavec::prelude::*;
//!
//! let store = VectorStore::new();
//! let glossary = store.get_or_create_collection("glossary", schema)?;
//! glossary.ensure_exists()?;
//! ```

// Error handling
pub use crate::error::{Error, Result};

// Store and collections
pub use crate::{
    Collection, CollectionInfo, Filter, SearchRequest, SearchResult, TypedCollection, TypedMatch,
    VectorStore,
};

// Data model
pub use crate::{
    CollectionSchema, DistanceMetric, FieldType, FieldValue, KeyType, Record, RecordKey,
    StoreConfig, VectorRecord,
};

// Embedding
pub use crate::{Embedder, HashingEmbedder, Ingestor, PendingRecord};

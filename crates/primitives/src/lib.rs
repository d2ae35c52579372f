//! In-memory vector collections for stratavec
//!
//! Builds on the data model in `stratavec-core`:
//! - [`VectorStore`]: collection registry and limits
//! - [`Collection`]: records, filters and exhaustive top-K search
//! - [`TypedCollection`]: the same, typed by a [`VectorRecord`](stratavec_core::VectorRecord)
//!
//! Search is brute force over every live record. Results are exact and
//! ordered best-first, ties broken by ascending key.

#![warn(missing_docs)]

pub mod vector;

pub use vector::{
    Collection, CollectionInfo, CmpOp, Filter, SearchRequest, SearchResult, TypedCollection,
    TypedMatch, VectorStore, VectorStoreBuilder,
};

//! Collection: a named, schema-bound set of keyed records
//!
//! ## Lifecycle
//!
//! A handle is handed out by `VectorStore::get_or_create_collection` in the
//! *pending* state. [`Collection::ensure_exists`] makes it *live*; repeat
//! calls are no-ops. `VectorStore::drop_collection` moves it to *dropped*,
//! after which every operation on any outstanding handle fails with
//! `CollectionNotFound`.
//!
//! ## Thread Safety
//!
//! Collection is a cheap `Clone` handle and is `Send + Sync`. Records live in a
//! `BTreeMap<RecordKey, Arc<Record>>` behind a `parking_lot::RwLock`:
//!
//! - writes take the write lock, so same-key writes are linearized (last
//!   write wins)
//! - reads and searches take the read lock and run concurrently
//! - a write swaps the whole `Arc<Record>`, so readers never see a torn record
//!
//! BTreeMap keeps iteration deterministic (ascending key).

use crate::vector::filter::{BoundFilter, Filter};
use crate::vector::search::{PreparedSearch, SearchRequest, SearchResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use stratavec_core::{CollectionSchema, Record, RecordKey, VectorError, VectorResult};
use tracing::{debug, info};

type RecordMap = BTreeMap<RecordKey, Arc<Record>>;

enum CollectionState {
    Pending,
    Live(RecordMap),
    Dropped,
}

struct CollectionInner {
    name: String,
    schema: Arc<CollectionSchema>,
    max_top_k: usize,
    state: RwLock<CollectionState>,
}

/// Collection summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name
    pub name: String,

    /// Immutable schema
    pub schema: CollectionSchema,

    /// Whether `ensure_exists` has been called
    pub exists: bool,

    /// Current record count
    pub count: usize,
}

/// Handle to a collection
#[derive(Clone)]
pub struct Collection {
    inner: Arc<CollectionInner>,
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.inner.name)
            .field("exists", &self.exists())
            .finish()
    }
}

impl Collection {
    pub(crate) fn new(name: String, schema: CollectionSchema, max_top_k: usize) -> Self {
        Collection {
            inner: Arc::new(CollectionInner {
                name,
                schema: Arc::new(schema),
                max_top_k,
                state: RwLock::new(CollectionState::Pending),
            }),
        }
    }

    /// Collection name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Collection schema
    pub fn schema(&self) -> &CollectionSchema {
        &self.inner.schema
    }

    /// Whether two handles refer to the same collection instance
    pub fn same_as(&self, other: &Collection) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create the collection if it does not exist yet
    ///
    /// Idempotent: calling it on a live collection is a no-op.
    ///
    /// # Errors
    /// - `CollectionNotFound` if the collection was dropped
    pub fn ensure_exists(&self) -> VectorResult<()> {
        let mut state = self.inner.state.write();
        match &*state {
            CollectionState::Live(_) => Ok(()),
            CollectionState::Pending => {
                *state = CollectionState::Live(BTreeMap::new());
                info!(collection = %self.inner.name, "created collection");
                Ok(())
            }
            CollectionState::Dropped => Err(self.not_found()),
        }
    }

    /// Whether the collection is live
    pub fn exists(&self) -> bool {
        matches!(&*self.inner.state.read(), CollectionState::Live(_))
    }

    pub(crate) fn mark_dropped(&self) {
        *self.inner.state.write() = CollectionState::Dropped;
    }

    /// Number of records
    pub fn len(&self) -> VectorResult<usize> {
        self.read(|records| records.len())
    }

    /// Check if the collection holds no records
    pub fn is_empty(&self) -> VectorResult<bool> {
        self.read(|records| records.is_empty())
    }

    /// Summary of the collection
    ///
    /// # Errors
    /// - `CollectionNotFound` if the collection was dropped
    pub fn info(&self) -> VectorResult<CollectionInfo> {
        let state = self.inner.state.read();
        let (exists, count) = match &*state {
            CollectionState::Pending => (false, 0),
            CollectionState::Live(records) => (true, records.len()),
            CollectionState::Dropped => return Err(self.not_found()),
        };
        Ok(CollectionInfo {
            name: self.inner.name.clone(),
            schema: CollectionSchema::clone(&self.inner.schema),
            exists,
            count,
        })
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Insert or fully replace a record
    ///
    /// Returns the key written. On error the collection is unchanged.
    ///
    /// # Errors
    /// - `DimensionMismatch` if a vector has the wrong length
    /// - `InvalidRecord` if the record does not fit the schema
    /// - `CollectionNotFound` if the collection is not live
    pub fn upsert(&self, record: Record) -> VectorResult<RecordKey> {
        self.inner.schema.validate_record(&record)?;
        let key = record.key().clone();
        self.write(|records| {
            records.insert(key.clone(), Arc::new(record));
        })?;
        Ok(key)
    }

    /// Insert or replace many records, reporting per-record outcomes
    ///
    /// Outcomes are in input order. Valid records are written even when others
    /// in the batch fail; all of them are written under a single lock
    /// acquisition. The outer error only reports that the collection is not
    /// live, in which case nothing was written.
    pub fn upsert_many(
        &self,
        records: impl IntoIterator<Item = Record>,
    ) -> VectorResult<Vec<VectorResult<RecordKey>>> {
        let mut outcomes = Vec::new();
        let mut valid = Vec::new();
        for record in records {
            match self.inner.schema.validate_record(&record) {
                Ok(()) => {
                    outcomes.push(Ok(record.key().clone()));
                    valid.push(record);
                }
                Err(e) => outcomes.push(Err(e)),
            }
        }

        let written = valid.len();
        self.write(|map| {
            for record in valid {
                map.insert(record.key().clone(), Arc::new(record));
            }
        })?;

        debug!(
            collection = %self.inner.name,
            written,
            failed = outcomes.len() - written,
            "upsert batch"
        );
        Ok(outcomes)
    }

    /// Delete a record
    ///
    /// Returns true if a record was removed. Deleting a missing key is a
    /// no-op that returns false.
    pub fn delete(&self, key: impl Into<RecordKey>) -> VectorResult<bool> {
        let key = key.into();
        self.write(|records| records.remove(&key).is_some())
    }

    /// Delete many records, returning how many were removed
    pub fn delete_many(&self, keys: impl IntoIterator<Item = RecordKey>) -> VectorResult<usize> {
        let keys: Vec<RecordKey> = keys.into_iter().collect();
        self.write(|records| keys.iter().filter(|k| records.remove(k).is_some()).count())
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get a record by key, `None` if absent
    pub fn get(&self, key: impl Into<RecordKey>) -> VectorResult<Option<Record>> {
        let key = key.into();
        self.read(|records| records.get(&key).map(|r| Record::clone(r)))
    }

    /// Get many records, one slot per requested key
    pub fn get_many(
        &self,
        keys: impl IntoIterator<Item = RecordKey>,
    ) -> VectorResult<Vec<Option<Record>>> {
        let keys: Vec<RecordKey> = keys.into_iter().collect();
        self.read(|records| {
            keys.iter()
                .map(|k| records.get(k).map(|r| Record::clone(r)))
                .collect()
        })
    }

    /// All keys in ascending order
    pub fn keys(&self) -> VectorResult<Vec<RecordKey>> {
        self.read(|records| records.keys().cloned().collect())
    }

    /// Validate a filter against this collection's schema
    ///
    /// Searches bind their filter anyway; this lets callers fail early.
    pub fn bind_filter(&self, filter: &Filter) -> VectorResult<BoundFilter> {
        filter.bind(&self.inner.schema)
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Top-K search on the default vector field
    ///
    /// Results are best-first for the field's metric, ties by ascending key.
    /// Fewer than `top_k` results are returned when fewer records qualify.
    ///
    /// # Errors
    /// - `InvalidTopK` if `top_k` is 0 or above the store maximum
    /// - `DimensionMismatch` if the query has the wrong length
    /// - `InvalidFilterField` if the filter references an unknown or
    ///   unindexed field
    /// - `CollectionNotFound` if the collection is not live
    pub fn search(
        &self,
        query: &[f32],
        top_k: usize,
        filter: Option<&Filter>,
    ) -> VectorResult<Vec<SearchResult>> {
        self.run_search(query, top_k, None, filter, None)
    }

    /// Search with full parameters
    pub fn search_with(&self, request: &SearchRequest) -> VectorResult<Vec<SearchResult>> {
        self.run_search(
            &request.query,
            request.top_k,
            request.vector_field.as_deref(),
            request.filter.as_ref(),
            request.min_score,
        )
    }

    fn run_search(
        &self,
        query: &[f32],
        top_k: usize,
        vector_field: Option<&str>,
        filter: Option<&Filter>,
        min_score: Option<f32>,
    ) -> VectorResult<Vec<SearchResult>> {
        let prepared = PreparedSearch::prepare(
            &self.inner.schema,
            query,
            top_k,
            vector_field,
            filter,
            min_score,
            self.inner.max_top_k,
        )?;
        let outcome = self.read(|records| prepared.execute(records.values()))?;
        debug!(
            collection = %self.inner.name,
            scanned = outcome.scanned,
            matched = outcome.matched,
            returned = outcome.results.len(),
            "search"
        );
        Ok(outcome.results)
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn read<R>(&self, f: impl FnOnce(&RecordMap) -> R) -> VectorResult<R> {
        match &*self.inner.state.read() {
            CollectionState::Live(records) => Ok(f(records)),
            _ => Err(self.not_found()),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut RecordMap) -> R) -> VectorResult<R> {
        match &mut *self.inner.state.write() {
            CollectionState::Live(records) => Ok(f(records)),
            _ => Err(self.not_found()),
        }
    }

    fn not_found(&self) -> VectorError {
        VectorError::CollectionNotFound {
            name: self.inner.name.clone(),
        }
    }
}

//! Collections typed by an application record
//!
//! [`TypedCollection`] wraps a [`Collection`] whose schema comes from a
//! [`VectorRecord`] implementation, converting on the way in and out.

use crate::vector::collection::Collection;
use crate::vector::filter::Filter;
use std::marker::PhantomData;
use stratavec_core::{RecordKey, VectorRecord, VectorResult};

/// Typed search result
#[derive(Debug, Clone, PartialEq)]
pub struct TypedMatch<R> {
    /// Matched record, converted back to the application type
    pub record: R,

    /// Raw metric score
    pub score: f32,
}

/// A collection whose records are `R`
pub struct TypedCollection<R> {
    inner: Collection,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for TypedCollection<R> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<R> std::fmt::Debug for TypedCollection<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TypedCollection").field(&self.inner).finish()
    }
}

impl<R> TypedCollection<R> {
    pub(crate) fn new(inner: Collection) -> Self {
        Self {
            inner,
            _record: PhantomData,
        }
    }

    /// The untyped collection underneath
    pub fn collection(&self) -> &Collection {
        &self.inner
    }
}

impl<R: VectorRecord> TypedCollection<R> {
    /// See [`Collection::ensure_exists`]
    pub fn ensure_exists(&self) -> VectorResult<()> {
        self.inner.ensure_exists()
    }

    /// Number of records
    pub fn len(&self) -> VectorResult<usize> {
        self.inner.len()
    }

    /// Check if the collection holds no records
    pub fn is_empty(&self) -> VectorResult<bool> {
        self.inner.is_empty()
    }

    /// Insert or replace a record
    pub fn upsert(&self, record: R) -> VectorResult<RecordKey> {
        self.inner.upsert(record.into_record())
    }

    /// Insert or replace many records, reporting per-record outcomes
    pub fn upsert_many(
        &self,
        records: impl IntoIterator<Item = R>,
    ) -> VectorResult<Vec<VectorResult<RecordKey>>> {
        self.inner
            .upsert_many(records.into_iter().map(VectorRecord::into_record))
    }

    /// Get a record by key
    ///
    /// # Errors
    /// - `InvalidRecord` if the stored record does not convert into `R`
    pub fn get(&self, key: impl Into<RecordKey>) -> VectorResult<Option<R>> {
        self.inner.get(key)?.map(R::from_record).transpose()
    }

    /// Delete a record, returning whether it existed
    pub fn delete(&self, key: impl Into<RecordKey>) -> VectorResult<bool> {
        self.inner.delete(key)
    }

    /// Top-K search on the default vector field
    pub fn search(
        &self,
        query: &[f32],
        top_k: usize,
        filter: Option<&Filter>,
    ) -> VectorResult<Vec<TypedMatch<R>>> {
        self.inner
            .search(query, top_k, filter)?
            .into_iter()
            .map(|hit| {
                Ok(TypedMatch {
                    record: R::from_record(hit.record)?,
                    score: hit.score,
                })
            })
            .collect()
    }
}

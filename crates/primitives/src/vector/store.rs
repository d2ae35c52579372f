//! VectorStore: registry of named collections
//!
//! ## Design
//!
//! VectorStore maps collection names to [`Collection`] handles. It holds:
//! - `Arc<RwLock<BTreeMap<String, Collection>>>` for the registry
//! - `Arc<StoreConfig>` for the limits checked at registration
//!
//! A schema is fixed the first time a name is registered. Asking for the same
//! name with an equal schema returns the same collection; a different schema
//! is a `SchemaMismatch`.
//!
//! ## Thread Safety
//!
//! VectorStore is `Send + Sync` and cheap to clone; clones share the registry.
//! Registration happens under the write lock, so concurrent callers racing on
//! one name all receive the same collection.

use crate::vector::collection::{Collection, CollectionInfo};
use crate::vector::typed::TypedCollection;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use stratavec_core::{CollectionSchema, StoreConfig, VectorError, VectorRecord, VectorResult};
use tracing::{info, warn};

/// Registry of vector collections
///
/// Uses BTreeMap so listings come back sorted by name.
///
/// # Example
///
/// ```ignore
/// use stratavec_primitives::VectorStore;
///
/// let store = VectorStore::new();
/// let glossary = store.get_or_create_collection("glossary", schema)?;
/// glossary.ensure_exists()?;
/// glossary.upsert(record)?;
///
/// let hits = glossary.search(&query, 5, None)?;
/// ```
#[derive(Clone)]
pub struct VectorStore {
    collections: Arc<RwLock<BTreeMap<String, Collection>>>,
    config: Arc<StoreConfig>,
}

impl Default for VectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VectorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorStore")
            .field("collections", &self.collections.read().len())
            .field("config", &self.config)
            .finish()
    }
}

impl VectorStore {
    /// Create a store with default limits
    pub fn new() -> Self {
        Self::from_parts(StoreConfig::default())
    }

    /// Create a store with custom limits
    ///
    /// # Errors
    /// - `Config` if a limit is zero
    pub fn with_config(config: StoreConfig) -> VectorResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    /// Start building a store
    pub fn builder() -> VectorStoreBuilder {
        VectorStoreBuilder::default()
    }

    fn from_parts(config: StoreConfig) -> Self {
        Self {
            collections: Arc::new(RwLock::new(BTreeMap::new())),
            config: Arc::new(config),
        }
    }

    /// Limits this store enforces
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ========================================================================
    // Collection Management
    // ========================================================================

    /// Get the collection registered under `name`, registering it first if new
    ///
    /// The returned collection must still be made live with
    /// [`Collection::ensure_exists`] before use.
    ///
    /// # Errors
    /// - `InvalidCollectionName` if the name is invalid
    /// - `InvalidSchema` if a vector dimension exceeds `max_dimension`
    /// - `SchemaMismatch` if the name is registered with a different schema
    /// - `CapacityExceeded` if `max_collections` is reached
    pub fn get_or_create_collection(
        &self,
        name: &str,
        schema: CollectionSchema,
    ) -> VectorResult<Collection> {
        validate_collection_name(name, self.config.max_name_len)?;

        if schema.max_dimension() > self.config.max_dimension {
            return Err(VectorError::invalid_schema(format!(
                "dimension {} exceeds maximum {}",
                schema.max_dimension(),
                self.config.max_dimension
            )));
        }

        let mut collections = self.collections.write();

        if let Some(existing) = collections.get(name) {
            if let Some(reason) = existing.schema().difference(&schema) {
                warn!(collection = name, %reason, "schema mismatch on registration");
                return Err(VectorError::SchemaMismatch {
                    name: name.to_string(),
                    reason,
                });
            }
            return Ok(existing.clone());
        }

        if let Some(limit) = self.config.max_collections {
            if collections.len() >= limit {
                return Err(VectorError::CapacityExceeded {
                    resource: "collections",
                    limit,
                });
            }
        }

        info!(
            collection = name,
            key = %schema.key().name,
            vectors = schema.vector_fields().len(),
            "registered collection"
        );
        let collection = Collection::new(name.to_string(), schema, self.config.max_top_k);
        collections.insert(name.to_string(), collection.clone());
        Ok(collection)
    }

    /// Look up a registered collection
    pub fn collection(&self, name: &str) -> Option<Collection> {
        self.collections.read().get(name).cloned()
    }

    /// Summaries of every registered collection, sorted by name
    pub fn list_collections(&self) -> Vec<CollectionInfo> {
        self.collections
            .read()
            .values()
            .filter_map(|c| c.info().ok())
            .collect()
    }

    /// Remove a collection and its records
    ///
    /// Outstanding handles become unusable (`CollectionNotFound`). The name
    /// may be registered again afterwards, with any schema. Returns false if
    /// the name was not registered.
    pub fn drop_collection(&self, name: &str) -> bool {
        let removed = self.collections.write().remove(name);
        match removed {
            Some(collection) => {
                collection.mark_dropped();
                info!(collection = name, "dropped collection");
                true
            }
            None => false,
        }
    }

    /// Get or create a collection typed by an application record
    ///
    /// # Errors
    /// Same as [`get_or_create_collection`](Self::get_or_create_collection),
    /// plus any error from `R::schema()`.
    pub fn typed_collection<R: VectorRecord>(&self, name: &str) -> VectorResult<TypedCollection<R>> {
        let collection = self.get_or_create_collection(name, R::schema()?)?;
        Ok(TypedCollection::new(collection))
    }
}

/// Builder for [`VectorStore`]
#[derive(Debug, Clone, Default)]
pub struct VectorStoreBuilder {
    config: StoreConfig,
}

impl VectorStoreBuilder {
    /// Replace all limits at once
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Largest dimension a schema may declare
    pub fn max_dimension(mut self, max: usize) -> Self {
        self.config.max_dimension = max;
        self
    }

    /// Largest `top_k` a search may request
    pub fn max_top_k(mut self, max: usize) -> Self {
        self.config.max_top_k = max;
        self
    }

    /// Cap on registered collections
    pub fn max_collections(mut self, max: usize) -> Self {
        self.config.max_collections = Some(max);
        self
    }

    /// Longest collection name, in bytes
    pub fn max_name_len(mut self, max: usize) -> Self {
        self.config.max_name_len = max;
        self
    }

    /// Validate the limits and build the store
    pub fn build(self) -> VectorResult<VectorStore> {
        VectorStore::with_config(self.config)
    }
}

/// Validate a collection name
///
/// Rules:
/// - Non-empty
/// - At most `max_len` bytes
/// - No `/`
/// - No leading `_` (reserved)
pub fn validate_collection_name(name: &str, max_len: usize) -> VectorResult<()> {
    let reason = if name.is_empty() {
        Some("name cannot be empty".to_string())
    } else if name.len() > max_len {
        Some(format!("name exceeds {} bytes", max_len))
    } else if name.contains('/') {
        Some("name cannot contain '/'".to_string())
    } else if name.starts_with('_') {
        Some("names starting with '_' are reserved".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(VectorError::InvalidCollectionName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

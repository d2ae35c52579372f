//! Vector collections and similarity search
//!
//! - **VectorStore**: registry of named collections with fixed schemas
//! - **Collection**: keyed records, CRUD and top-K search
//! - **Filter**: boolean predicates over indexed data fields
//! - **SearchRequest/SearchResult**: search parameters and scored records
//! - **TypedCollection**: collection bound to an application record type
//! - **distance**: cosine, dot product and Euclidean scoring

pub mod collection;
pub mod distance;
pub mod filter;
pub mod search;
pub mod store;
pub mod typed;

pub use collection::{Collection, CollectionInfo};
pub use distance::{cosine_similarity, dot_product, euclidean_distance, similarity};
pub use filter::{BoundFilter, CmpOp, Filter};
pub use search::{best_first, SearchRequest, SearchResult};
pub use store::{validate_collection_name, VectorStore, VectorStoreBuilder};
pub use typed::{TypedCollection, TypedMatch};

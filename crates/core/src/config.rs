//! Store configuration
//!
//! [`StoreConfig`] holds the limits a `VectorStore` enforces. It can be built
//! in code or loaded from TOML:
//!
//! ```toml
//! max_dimension = 4096
//! max_top_k = 1000
//! max_collections = 16
//! ```
//!
//! Missing keys fall back to their defaults.

use crate::error::{VectorError, VectorResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default upper bound on a vector field's dimension
pub const DEFAULT_MAX_DIMENSION: usize = 65_536;

/// Default upper bound on `top_k`
pub const DEFAULT_MAX_TOP_K: usize = 10_000;

/// Default upper bound on collection name length, in bytes
pub const DEFAULT_MAX_NAME_LEN: usize = 256;

/// Limits enforced by a vector store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Largest dimension a schema may declare
    pub max_dimension: usize,

    /// Largest `top_k` a search may request
    pub max_top_k: usize,

    /// Cap on registered collections (`None` = unlimited)
    pub max_collections: Option<usize>,

    /// Longest collection name, in bytes
    pub max_name_len: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_top_k: DEFAULT_MAX_TOP_K,
            max_collections: None,
            max_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

impl StoreConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> VectorResult<Self> {
        let config: StoreConfig = toml::from_str(s).map_err(|e| VectorError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> VectorResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| VectorError::Config {
            message: format!("failed to read '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that every limit is non-zero
    pub fn validate(&self) -> VectorResult<()> {
        let zero = [
            ("max_dimension", self.max_dimension),
            ("max_top_k", self.max_top_k),
            ("max_name_len", self.max_name_len),
            ("max_collections", self.max_collections.unwrap_or(1)),
        ]
        .into_iter()
        .find(|(_, v)| *v == 0);

        match zero {
            Some((name, _)) => Err(VectorError::Config {
                message: format!("{} must be > 0", name),
            }),
            None => Ok(()),
        }
    }
}

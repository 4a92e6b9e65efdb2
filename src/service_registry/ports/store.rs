//! Hierarchical key-value store port backing the registry.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value store operations.
pub type KeyValueStoreResult<T> = Result<T, KeyValueStoreError>;

/// Node values keyed by full path. `None` marks a node without data.
pub type StoreValues = BTreeMap<String, Option<Vec<u8>>>;

/// Path-addressed durable store with `/`-separated hierarchical nodes.
///
/// Writing a node implicitly creates its missing ancestors without data.
/// Implementations must make [`KeyValueStore::set_many`] atomic and reads
/// consistent; the registry relies on the store as its only serialization
/// point.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the data stored at `path`.
    ///
    /// Returns `Ok(None)` for a node that exists without data.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::NotFound`] when no node exists at
    /// `path`.
    async fn get(&self, path: &str) -> KeyValueStoreResult<Option<Vec<u8>>>;

    /// Atomically writes every node in `values`, creating ancestors as
    /// needed. Either all nodes are written or none are.
    async fn set_many(&self, values: StoreValues) -> KeyValueStoreResult<()>;

    /// Reads several nodes in one batch.
    ///
    /// The returned map only contains paths that exist; missing nodes are
    /// omitted rather than reported as errors.
    async fn get_many(&self, paths: &[String]) -> KeyValueStoreResult<StoreValues>;

    /// Lists the names (not full paths) of the direct children of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::NotFound`] when no node exists at
    /// `path`.
    async fn children(&self, path: &str) -> KeyValueStoreResult<Vec<String>>;

    /// Deletes the node at `path` and every descendant.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::NotFound`] when no node exists at
    /// `path`.
    async fn recursive_delete(&self, path: &str) -> KeyValueStoreResult<()>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum KeyValueStoreError {
    /// No node exists at the requested path.
    #[error("no node found at path: {0}")]
    NotFound(String),

    /// The path is empty or contains empty segments.
    #[error("invalid store path: '{0}'")]
    InvalidPath(String),

    /// Backend failure other than a missing node.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl KeyValueStoreError {
    /// Wraps a backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Returns whether this error reports a missing node.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

//! In-memory hierarchical key-value store.

use crate::service_registry::ports::{
    KeyValueStore, KeyValueStoreError, KeyValueStoreResult, StoreValues,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

const PATH_SEPARATOR: char = '/';

/// Thread-safe in-memory store with implicit parent nodes.
///
/// Every written path also materializes its ancestors as nodes without data,
/// so listing children and recursive deletes behave like a tree store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    nodes: Arc<RwLock<BTreeMap<String, Option<Vec<u8>>>>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the full path of every node, ancestors included, sorted.
    ///
    /// # Errors
    ///
    /// Returns backend errors when lock acquisition fails.
    pub fn paths(&self) -> KeyValueStoreResult<Vec<String>> {
        let nodes = self.nodes.read().map_err(lock_error)?;
        Ok(nodes.keys().cloned().collect())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, path: &str) -> KeyValueStoreResult<Option<Vec<u8>>> {
        validate_path(path)?;
        let nodes = self.nodes.read().map_err(lock_error)?;
        nodes
            .get(path)
            .cloned()
            .ok_or_else(|| KeyValueStoreError::NotFound(path.to_owned()))
    }

    async fn set_many(&self, values: StoreValues) -> KeyValueStoreResult<()> {
        for path in values.keys() {
            validate_path(path)?;
        }

        let mut nodes = self.nodes.write().map_err(lock_error)?;
        for (path, value) in values {
            for ancestor in ancestors(&path) {
                nodes.entry(ancestor).or_insert(None);
            }
            nodes.insert(path, value);
        }
        Ok(())
    }

    async fn get_many(&self, paths: &[String]) -> KeyValueStoreResult<StoreValues> {
        for path in paths {
            validate_path(path)?;
        }

        let nodes = self.nodes.read().map_err(lock_error)?;
        Ok(paths
            .iter()
            .filter_map(|path| {
                nodes
                    .get(path)
                    .map(|value| (path.clone(), value.clone()))
            })
            .collect())
    }

    async fn children(&self, path: &str) -> KeyValueStoreResult<Vec<String>> {
        validate_path(path)?;
        let nodes = self.nodes.read().map_err(lock_error)?;
        if !nodes.contains_key(path) {
            return Err(KeyValueStoreError::NotFound(path.to_owned()));
        }

        let prefix = format!("{path}{PATH_SEPARATOR}");
        Ok(nodes
            .range(prefix.clone()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(&prefix))
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|name| !name.contains(PATH_SEPARATOR))
            .map(str::to_owned)
            .collect())
    }

    async fn recursive_delete(&self, path: &str) -> KeyValueStoreResult<()> {
        validate_path(path)?;
        let mut nodes = self.nodes.write().map_err(lock_error)?;
        if nodes.remove(path).is_none() {
            return Err(KeyValueStoreError::NotFound(path.to_owned()));
        }

        let prefix = format!("{path}{PATH_SEPARATOR}");
        nodes.retain(|key, _| !key.starts_with(&prefix));
        Ok(())
    }
}

fn validate_path(path: &str) -> KeyValueStoreResult<()> {
    if path.split(PATH_SEPARATOR).any(str::is_empty) {
        return Err(KeyValueStoreError::InvalidPath(path.to_owned()));
    }
    Ok(())
}

/// Returns the strict ancestors of `path`, outermost first.
fn ancestors(path: &str) -> Vec<String> {
    let mut prefix = String::with_capacity(path.len());
    let mut found = Vec::new();
    let mut segments = path.split(PATH_SEPARATOR).peekable();
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            break;
        }
        if !prefix.is_empty() {
            prefix.push(PATH_SEPARATOR);
        }
        prefix.push_str(segment);
        found.push(prefix.clone());
    }
    found
}

fn lock_error(err: impl std::fmt::Display) -> KeyValueStoreError {
    KeyValueStoreError::backend(std::io::Error::other(err.to_string()))
}

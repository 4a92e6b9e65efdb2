//! Durable service registry with validate-then-persist writes.
//!
//! Provides [`ServiceRegistry`], which stores one node per service under
//! `ServiceList/<sanitized id>` with an `Id` leaf holding the raw identifier
//! and a `Context` leaf holding the opaque recovery context.

use crate::service_registry::{
    domain::{
        ServiceContext, ServiceEntry, ServiceHandle, ServiceId, ServiceRegistryDomainError,
    },
    ports::{
        KeyValueStore, KeyValueStoreError, ServiceBuildError, ServiceBuilder, StoreValues,
        UninstallCallback,
    },
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Root node under which every service entry is stored.
pub const ROOT_PATH_NAME: &str = "ServiceList";

/// Leaf holding the raw (unsanitized) service identifier.
pub const ID_NODE: &str = "Id";

/// Leaf holding the opaque context, or no data when none was supplied.
pub const CONTEXT_NODE: &str = "Context";

/// Service-level errors for registry operations.
#[derive(Debug, Error)]
pub enum ServiceRegistryError {
    /// Input validation failed before any I/O.
    #[error(transparent)]
    Domain(#[from] ServiceRegistryDomainError),

    /// The service builder rejected the identifier and context.
    #[error("rejected: build failed for service '{service_id}': {source}")]
    Build {
        /// Identifier passed to the builder.
        service_id: ServiceId,
        /// Failure reported by the builder.
        #[source]
        source: ServiceBuildError,
    },

    /// The backing store failed with something other than a missing node.
    #[error("internal storage error: {0}")]
    Storage(#[from] KeyValueStoreError),
}

/// Result type for registry operations.
pub type ServiceRegistryResult<T> = Result<T, ServiceRegistryError>;

/// Durable mapping from service identifier to recovery context.
///
/// Safe to call concurrently for different identifiers. Concurrent `put`
/// calls, or a `put` racing an uninstall, for the *same* identifier are not
/// serialized: both builder invocations may run and the last store write
/// wins. Callers needing create-only semantics must check [`Self::get`]
/// first and serialize per identifier themselves.
pub struct ServiceRegistry<K, B, C>
where
    K: KeyValueStore,
    B: ServiceBuilder,
    C: Clock + Send + Sync,
{
    store: Arc<K>,
    builder: Arc<B>,
    clock: Arc<C>,
}

impl<K, B, C> Clone for ServiceRegistry<K, B, C>
where
    K: KeyValueStore,
    B: ServiceBuilder,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            builder: Arc::clone(&self.builder),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<K, B, C> ServiceRegistry<K, B, C>
where
    K: KeyValueStore,
    B: ServiceBuilder,
    C: Clock + Send + Sync,
{
    /// Creates a registry over an already connected store.
    #[must_use]
    pub const fn new(store: Arc<K>, builder: Arc<B>, clock: Arc<C>) -> Self {
        Self {
            store,
            builder,
            clock,
        }
    }

    /// Returns the clock used to timestamp handle lifecycle changes.
    pub(crate) const fn clock(&self) -> &Arc<C> {
        &self.clock
    }

    /// Returns the context stored for `service_id`.
    ///
    /// Returns `Ok(None)` when no entry exists, and `Ok(Some(None))` when the
    /// entry exists but was added without a context.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryError::Storage`] for store failures other
    /// than a missing node.
    pub async fn get(
        &self,
        service_id: &ServiceId,
    ) -> ServiceRegistryResult<Option<Option<ServiceContext>>> {
        let path = leaf_path(service_id.sanitized_key().as_str(), CONTEXT_NODE);
        match self.store.get(&path).await {
            Ok(data) => Ok(Some(data.map(ServiceContext::from_persisted))),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Adds or replaces a service.
    ///
    /// The context is size-checked, then the service is built from exactly
    /// the data about to be stored, and only then are the `Id` and `Context`
    /// leaves written in one atomic batch. On any failure the store is left
    /// untouched. An existing entry with the same identifier is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryError::Domain`] when the context exceeds the
    /// size limit, [`ServiceRegistryError::Build`] when the builder fails, or
    /// [`ServiceRegistryError::Storage`] when the write fails.
    pub async fn put(
        &self,
        service_id: ServiceId,
        context: Option<Vec<u8>>,
    ) -> ServiceRegistryResult<ServiceHandle<B::Service>> {
        let validated_context = context
            .map(|bytes| ServiceContext::new(&service_id, bytes))
            .transpose()?;

        let service = self
            .builder
            .build_service(&service_id, validated_context.as_ref())
            .await
            .map_err(|source| ServiceRegistryError::Build {
                service_id: service_id.clone(),
                source,
            })?;

        let key = service_id.sanitized_key();
        let mut values = StoreValues::new();
        values.insert(
            leaf_path(key.as_str(), ID_NODE),
            Some(service_id.as_bytes().to_vec()),
        );
        values.insert(
            leaf_path(key.as_str(), CONTEXT_NODE),
            validated_context.map(ServiceContext::into_bytes),
        );
        self.store.set_many(values).await?;

        tracing::info!(service_id = %service_id, key = %key, "added service");
        Ok(ServiceHandle::new(service_id, service, &*self.clock))
    }

    /// Rebuilds every stored service, typically once at startup.
    ///
    /// Recovery is best-effort per entry: anomalous nodes and entries the
    /// builder rejects are logged and skipped so the remaining services still
    /// come back. The order of the returned handles is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryError::Storage`] when listing or reading the
    /// store fails. A missing root node yields an empty list.
    pub async fn recover(&self) -> ServiceRegistryResult<Vec<ServiceHandle<B::Service>>> {
        let entries = self.read_entries().await?;
        let mut recovered = Vec::with_capacity(entries.len());
        for entry in entries {
            let (service_id, context) = entry.into_parts();
            tracing::info!(service_id = %service_id, "recovering prior service");
            match self
                .builder
                .build_service(&service_id, context.as_ref())
                .await
            {
                Ok(service) => {
                    recovered.push(ServiceHandle::new(service_id, service, &*self.clock));
                }
                Err(err) => {
                    tracing::error!(
                        service_id = %service_id,
                        error = %err,
                        "unable to rebuild service during recovery, continuing without it"
                    );
                }
            }
        }
        Ok(recovered)
    }

    /// Lists every well-formed stored entry without building services.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryError::Storage`] when listing or reading the
    /// store fails. A missing root node yields an empty list.
    pub async fn list(&self) -> ServiceRegistryResult<Vec<ServiceEntry>> {
        self.read_entries().await
    }

    /// Returns the uninstall-completion callback that removes entries.
    ///
    /// This callback is the only path by which entries leave the store
    /// during normal operation.
    #[must_use]
    pub fn uninstall_callback(&self) -> RegistryUninstallCallback<K, B, C> {
        RegistryUninstallCallback {
            registry: self.clone(),
        }
    }

    /// Deletes the entry for `service_id`. A missing entry is not an error.
    pub(crate) async fn remove(&self, service_id: &ServiceId) -> ServiceRegistryResult<()> {
        let path = service_path(service_id.sanitized_key().as_str());
        match self.store.recursive_delete(&path).await {
            Ok(()) => {
                tracing::info!(service_id = %service_id, "removed service");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                tracing::info!(service_id = %service_id, "no service found, skipping removal");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn read_entries(&self) -> ServiceRegistryResult<Vec<ServiceEntry>> {
        let children = match self.store.children(ROOT_PATH_NAME).await {
            Ok(children) => children,
            Err(err) if err.is_not_found() => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut entries = Vec::with_capacity(children.len());
        for child in children {
            let id_path = leaf_path(&child, ID_NODE);
            let context_path = leaf_path(&child, CONTEXT_NODE);
            let mut leaves = self
                .store
                .get_many(&[id_path.clone(), context_path.clone()])
                .await?;

            if let Some(entry) = parse_entry(
                &child,
                leaves.remove(&id_path).flatten(),
                leaves.remove(&context_path),
            ) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }
}

/// Reconstructs one entry from its leaves, or logs why the node is skipped.
///
/// `id_data` is `None` when the `Id` leaf is missing or empty; `context_leaf`
/// is `None` when the `Context` leaf is missing and `Some(None)` when it
/// exists without data.
fn parse_entry(
    node: &str,
    id_data: Option<Vec<u8>>,
    context_leaf: Option<Option<Vec<u8>>>,
) -> Option<ServiceEntry> {
    let Some(raw_id) = id_data else {
        tracing::warn!(
            path = %leaf_path(node, ID_NODE),
            "missing Id data during service recovery, continuing without this service"
        );
        return None;
    };

    let service_id = match String::from_utf8(raw_id) {
        Ok(raw) => ServiceId::new(raw),
        Err(err) => {
            tracing::warn!(
                path = %leaf_path(node, ID_NODE),
                error = %err,
                "Id data is not valid UTF-8, continuing without this service"
            );
            return None;
        }
    };

    if service_id.sanitized_key().as_str() != node {
        tracing::warn!(
            service_id = %service_id,
            node,
            "Id data does not match its storage node, continuing without this service"
        );
        return None;
    }

    let Some(context_data) = context_leaf else {
        tracing::warn!(
            service_id = %service_id,
            path = %leaf_path(node, CONTEXT_NODE),
            "missing Context node during service recovery, continuing without this service"
        );
        return None;
    };

    Some(ServiceEntry::new(
        service_id,
        context_data.map(ServiceContext::from_persisted),
    ))
}

/// Uninstall-completion callback bound to a [`ServiceRegistry`].
///
/// Removal failures are logged and otherwise ignored; the entry is cleaned up
/// by a later uninstall attempt or manually.
pub struct RegistryUninstallCallback<K, B, C>
where
    K: KeyValueStore,
    B: ServiceBuilder,
    C: Clock + Send + Sync,
{
    registry: ServiceRegistry<K, B, C>,
}

#[async_trait]
impl<K, B, C> UninstallCallback for RegistryUninstallCallback<K, B, C>
where
    K: KeyValueStore,
    B: ServiceBuilder,
    C: Clock + Send + Sync,
{
    async fn uninstalled(&self, service_id: &ServiceId) {
        tracing::info!(
            service_id = %service_id,
            "service has completed uninstall, removing from registry"
        );
        if let Err(err) = self.registry.remove(service_id).await {
            tracing::error!(
                service_id = %service_id,
                error = %err,
                "failed to clean up uninstalled service"
            );
        }
    }
}

fn service_path(node: &str) -> String {
    format!("{ROOT_PATH_NAME}/{node}")
}

fn leaf_path(node: &str, leaf: &str) -> String {
    format!("{ROOT_PATH_NAME}/{node}/{leaf}")
}

//! Operator-facing orchestration of the registry and the live router.
//!
//! [`MultiServiceController`] is what a control surface calls: it persists
//! services through the [`ServiceRegistry`] and keeps the [`ServiceRouter`]
//! holding live handles in step with storage.

use super::registry::{ServiceRegistry, ServiceRegistryError};
use crate::service_registry::{
    domain::{
        ServiceContext, ServiceHandle, ServiceId, ServiceLifecycleState,
        ServiceRegistryDomainError,
    },
    ports::{
        KeyValueStore, ServiceBuilder, ServiceRouter, ServiceRouterError, UninstallCallback,
    },
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for multi-service operations.
#[derive(Debug, Error)]
pub enum MultiServiceControllerError {
    /// Registry operation failed.
    #[error(transparent)]
    Registry(#[from] ServiceRegistryError),
    /// Router operation failed.
    #[error(transparent)]
    Router(#[from] ServiceRouterError),
    /// The requested lifecycle transition is invalid.
    #[error(transparent)]
    Domain(#[from] ServiceRegistryDomainError),
    /// No live service exists with the given identifier.
    #[error("service '{0}' not found")]
    NotFound(ServiceId),
}

/// Result type for multi-service controller operations.
pub type MultiServiceControllerResult<T> = Result<T, MultiServiceControllerError>;

/// Operator-visible summary of one live service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    id: ServiceId,
    context: Option<ServiceContext>,
    lifecycle_state: ServiceLifecycleState,
}

impl ServiceSummary {
    /// Returns the service identifier.
    #[must_use]
    pub const fn id(&self) -> &ServiceId {
        &self.id
    }

    /// Returns the stored context, if any could be read.
    #[must_use]
    pub const fn context(&self) -> Option<&ServiceContext> {
        self.context.as_ref()
    }

    /// Returns the lifecycle state of the live handle.
    #[must_use]
    pub const fn lifecycle_state(&self) -> ServiceLifecycleState {
        self.lifecycle_state
    }

    /// Returns whether the service is uninstalling.
    #[must_use]
    pub const fn is_uninstalling(&self) -> bool {
        self.lifecycle_state.is_draining()
    }
}

/// Keeps the persistent registry and the live router in sync.
pub struct MultiServiceController<K, B, C, R>
where
    K: KeyValueStore,
    B: ServiceBuilder,
    B::Service: Clone,
    C: Clock + Send + Sync,
    R: ServiceRouter<B::Service>,
{
    registry: ServiceRegistry<K, B, C>,
    router: Arc<R>,
}

impl<K, B, C, R> MultiServiceController<K, B, C, R>
where
    K: KeyValueStore,
    B: ServiceBuilder,
    B::Service: Clone,
    C: Clock + Send + Sync,
    R: ServiceRouter<B::Service>,
{
    /// Creates a controller over a registry and a router.
    #[must_use]
    pub const fn new(registry: ServiceRegistry<K, B, C>, router: Arc<R>) -> Self {
        Self { registry, router }
    }

    /// Returns the underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &ServiceRegistry<K, B, C> {
        &self.registry
    }

    /// Recovers every stored service into the router.
    ///
    /// Returns the number of services that were rebuilt.
    ///
    /// # Errors
    ///
    /// Returns registry storage errors or router errors. Entries that fail
    /// to rebuild are skipped, not reported.
    pub async fn recover(&self) -> MultiServiceControllerResult<usize> {
        let handles = self.registry.recover().await?;
        let recovered = handles.len();
        for handle in handles {
            self.router.put_service(handle).await?;
        }
        tracing::info!(recovered, "recovered prior services");
        Ok(recovered)
    }

    /// Builds, persists, and starts routing a service.
    ///
    /// Re-adding an active identifier replaces both the stored entry and
    /// the live handle. A draining identifier is refused until its uninstall
    /// completes, since completion deletes whatever is stored under it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryDomainError::AlreadyUninstalling`] when the
    /// live handle is draining, [`MultiServiceControllerError::Registry`]
    /// when the context is rejected, the build fails, or storage fails, and
    /// [`MultiServiceControllerError::Router`] when the handle cannot be
    /// routed.
    pub async fn add_service(
        &self,
        service_id: ServiceId,
        context: Option<Vec<u8>>,
    ) -> MultiServiceControllerResult<ServiceHandle<B::Service>> {
        let live = self.router.get_service(&service_id).await?;
        if live.is_some_and(|handle| handle.is_draining()) {
            tracing::warn!(service_id = %service_id, "refusing to replace draining service");
            return Err(ServiceRegistryDomainError::AlreadyUninstalling {
                service_id: service_id.as_str().to_owned(),
            }
            .into());
        }

        let handle = self.registry.put(service_id, context).await?;
        self.router.put_service(handle.clone()).await?;
        Ok(handle)
    }

    /// Summarizes every live service.
    ///
    /// A service whose context cannot be read is still listed, without a
    /// context.
    ///
    /// # Errors
    ///
    /// Returns router errors.
    pub async fn list_services(&self) -> MultiServiceControllerResult<Vec<ServiceSummary>> {
        let service_ids = self.router.service_ids().await?;
        let mut summaries = Vec::with_capacity(service_ids.len());
        for service_id in service_ids {
            // The service may finish uninstalling while we iterate.
            let Some(handle) = self.router.get_service(&service_id).await? else {
                continue;
            };

            let context = match self.registry.get(&service_id).await {
                Ok(stored) => stored.flatten(),
                Err(err) => {
                    tracing::error!(
                        service_id = %service_id,
                        error = %err,
                        "failed to read context for service"
                    );
                    None
                }
            };

            summaries.push(ServiceSummary {
                id: service_id,
                context,
                lifecycle_state: handle.lifecycle_state(),
            });
        }
        Ok(summaries)
    }

    /// Requests removal of a live service, moving it to `Draining`.
    ///
    /// The stored entry stays in place until the completion callback fires.
    ///
    /// # Errors
    ///
    /// Returns [`MultiServiceControllerError::NotFound`] when no live handle
    /// exists, [`MultiServiceControllerError::Domain`] when the service is
    /// already draining, or router errors.
    pub async fn uninstall_service(
        &self,
        service_id: &ServiceId,
    ) -> MultiServiceControllerResult<ServiceHandle<B::Service>> {
        let mut handle = self
            .router
            .get_service(service_id)
            .await?
            .ok_or_else(|| MultiServiceControllerError::NotFound(service_id.clone()))?;
        handle.begin_draining(&**self.registry.clock())?;
        self.router.put_service(handle.clone()).await?;
        tracing::info!(service_id = %service_id, "triggered removal of service");
        Ok(handle)
    }

    /// Returns the callback to fire once a draining service finished
    /// uninstalling.
    #[must_use]
    pub fn completion_callback(&self) -> ServiceUninstallCompletion<K, B, C, R> {
        ServiceUninstallCompletion {
            registry: self.registry.clone(),
            router: Arc::clone(&self.router),
            clock: Arc::clone(self.registry.clock()),
        }
    }
}

/// Uninstall-completion callback that cleans up storage and the router.
///
/// The live handle is dropped only after the stored entry is gone. When
/// removal fails the handle stays routed in `Draining`, so a later completion
/// retries the cleanup and a restart does not revive the service as active.
pub struct ServiceUninstallCompletion<K, B, C, R>
where
    K: KeyValueStore,
    B: ServiceBuilder,
    B::Service: Clone,
    C: Clock + Send + Sync,
    R: ServiceRouter<B::Service>,
{
    registry: ServiceRegistry<K, B, C>,
    router: Arc<R>,
    clock: Arc<C>,
}

#[async_trait]
impl<K, B, C, R> UninstallCallback for ServiceUninstallCompletion<K, B, C, R>
where
    K: KeyValueStore,
    B: ServiceBuilder,
    B::Service: Clone,
    C: Clock + Send + Sync,
    R: ServiceRouter<B::Service>,
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
                "failed to clean up uninstalled service, keeping it routed"
            );
            return;
        }

        match self.router.remove_service(service_id).await {
            Ok(Some(mut handle)) => {
                if let Err(err) = handle.mark_removed(&*self.clock) {
                    tracing::warn!(
                        service_id = %service_id,
                        error = %err,
                        "unexpected lifecycle state"
                    );
                }
                tracing::info!(
                    service_id = %service_id,
                    state = %handle.lifecycle_state(),
                    "stopped routing uninstalled service"
                );
            }
            Ok(None) => {
                tracing::debug!(service_id = %service_id, "uninstalled service was not routed");
            }
            Err(err) => {
                tracing::error!(
                    service_id = %service_id,
                    error = %err,
                    "failed to drop uninstalled service from router"
                );
            }
        }
    }
}

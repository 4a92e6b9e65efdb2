//! In-memory router holding live service handles.

use crate::service_registry::{
    domain::{ServiceHandle, ServiceId},
    ports::{ServiceRouter, ServiceRouterError, ServiceRouterResult},
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory service router.
///
/// Handles are keyed by identifier, so adding a handle for an existing
/// identifier replaces the previous one.
#[derive(Debug)]
pub struct InMemoryServiceRouter<S> {
    services: Arc<RwLock<BTreeMap<ServiceId, ServiceHandle<S>>>>,
}

impl<S> InMemoryServiceRouter<S> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            services: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl<S> Default for InMemoryServiceRouter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for InMemoryServiceRouter<S> {
    fn clone(&self) -> Self {
        Self {
            services: Arc::clone(&self.services),
        }
    }
}

#[async_trait]
impl<S> ServiceRouter<S> for InMemoryServiceRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put_service(&self, handle: ServiceHandle<S>) -> ServiceRouterResult<()> {
        let mut services = self.services.write().map_err(lock_error)?;
        services.insert(handle.id().clone(), handle);
        Ok(())
    }

    async fn service_ids(&self) -> ServiceRouterResult<Vec<ServiceId>> {
        let services = self.services.read().map_err(lock_error)?;
        Ok(services.keys().cloned().collect())
    }

    async fn get_service(
        &self,
        service_id: &ServiceId,
    ) -> ServiceRouterResult<Option<ServiceHandle<S>>> {
        let services = self.services.read().map_err(lock_error)?;
        Ok(services.get(service_id).cloned())
    }

    async fn remove_service(
        &self,
        service_id: &ServiceId,
    ) -> ServiceRouterResult<Option<ServiceHandle<S>>> {
        let mut services = self.services.write().map_err(lock_error)?;
        Ok(services.remove(service_id))
    }
}

fn lock_error(err: impl std::fmt::Display) -> ServiceRouterError {
    ServiceRouterError::runtime(std::io::Error::other(err.to_string()))
}

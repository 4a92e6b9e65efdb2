//! Router port holding the live set of multiplexed services.

use crate::service_registry::domain::{ServiceHandle, ServiceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for service router operations.
pub type ServiceRouterResult<T> = Result<T, ServiceRouterError>;

/// Live set of service handles that cluster events are routed to.
///
/// The registry never routes events itself; callers push the handles it
/// returns into a router.
#[async_trait]
pub trait ServiceRouter<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Adds a handle, replacing any handle with the same identifier.
    async fn put_service(&self, handle: ServiceHandle<S>) -> ServiceRouterResult<()>;

    /// Returns the identifiers of every live handle, sorted.
    async fn service_ids(&self) -> ServiceRouterResult<Vec<ServiceId>>;

    /// Returns the handle for `service_id`, if present.
    async fn get_service(
        &self,
        service_id: &ServiceId,
    ) -> ServiceRouterResult<Option<ServiceHandle<S>>>;

    /// Removes and returns the handle for `service_id`, if present.
    async fn remove_service(
        &self,
        service_id: &ServiceId,
    ) -> ServiceRouterResult<Option<ServiceHandle<S>>>;
}

/// Errors returned by service router adapters.
#[derive(Debug, Clone, Error)]
pub enum ServiceRouterError {
    /// Generic router failure.
    #[error("service router error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServiceRouterError {
    /// Wraps a runtime error from the router adapter.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}

//! Service construction port supplied by the embedding application.

use crate::service_registry::domain::{ServiceContext, ServiceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for service builder operations.
pub type ServiceBuildResult<T> = Result<T, ServiceBuildError>;

/// Rebuilds a runnable service from its identifier and stored context.
///
/// Builders must be deterministic and safe to call repeatedly with the same
/// arguments: the registry calls them once when a service is added and again
/// for every recovery after a restart.
#[async_trait]
pub trait ServiceBuilder: Send + Sync {
    /// Runnable service type produced by this builder.
    type Service: Send + Sync + 'static;

    /// Builds the service for `service_id` from `context`.
    ///
    /// `context` is `None` when the service was added without one.
    async fn build_service(
        &self,
        service_id: &ServiceId,
        context: Option<&ServiceContext>,
    ) -> ServiceBuildResult<Self::Service>;
}

/// Failure reported by a [`ServiceBuilder`].
#[derive(Debug, Clone, Error)]
#[error(transparent)]
pub struct ServiceBuildError(Arc<dyn std::error::Error + Send + Sync>);

impl ServiceBuildError {
    /// Wraps the underlying construction failure.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }

    /// Creates a failure from a plain message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(std::io::Error::other(message.into()))
    }
}

//! Capability probe port describing what the cluster supports.

use crate::framework::domain::ClusterCapabilities;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for capability probe operations.
pub type CapabilityProbeResult<T> = Result<T, CapabilityProbeError>;

/// Reports the features of the connected cluster.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CapabilityProbe: Send + Sync {
    /// Queries the cluster's supported features.
    async fn probe(&self) -> CapabilityProbeResult<ClusterCapabilities>;
}

/// Errors returned by capability probe implementations.
#[derive(Debug, Clone, Error)]
pub enum CapabilityProbeError {
    /// The cluster could not be queried.
    #[error("capability probe unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl CapabilityProbeError {
    /// Wraps a probe failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}

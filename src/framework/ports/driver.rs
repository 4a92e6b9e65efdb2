//! Cluster driver port owning the connection to the master.

use crate::framework::domain::{DriverStatus, RegistrationDescriptor};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for cluster driver operations.
pub type ClusterDriverResult<T> = Result<T, ClusterDriverError>;

/// Registers the framework and runs the cluster event loop.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterDriver: Send + Sync {
    /// Registers with the master found at `master_uri` and runs until the
    /// connection terminates.
    ///
    /// # Errors
    ///
    /// Returns [`ClusterDriverError`] when the driver cannot be created or
    /// started at all.
    async fn run(
        &self,
        descriptor: &RegistrationDescriptor,
        master_uri: &str,
    ) -> ClusterDriverResult<DriverStatus>;
}

/// Errors returned by cluster driver implementations.
#[derive(Debug, Clone, Error)]
pub enum ClusterDriverError {
    /// The driver failed before producing a terminal status.
    #[error("cluster driver error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl ClusterDriverError {
    /// Wraps a driver failure.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}

//! Ports for the event bridge and the operator control surface.

use crate::framework::domain::FrameworkId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event bridge operations.
pub type EventBridgeResult<T> = Result<T, EventBridgeError>;

/// Result type for control surface operations.
pub type ControlSurfaceResult<T> = Result<T, ControlSurfaceError>;

/// Callback a control surface fires once it is serving requests.
pub type ReadyCallback = Box<dyn FnOnce() + Send + 'static>;

/// Bridge between cluster events and the hosted services.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventBridge: Send + Sync {
    /// Returns the identifier of a prior registration, or `None` on first
    /// start.
    async fn fetch_framework_id(&self) -> EventBridgeResult<Option<FrameworkId>>;

    /// Starts accepting resource offers. Offers received before this call are
    /// declined.
    fn set_ready_to_accept_offers(&self);
}

/// Operator-facing control surface, such as an HTTP API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ControlSurface: Send + Sync {
    /// Starts serving and arranges for `on_ready` to run once requests can
    /// be answered.
    ///
    /// # Errors
    ///
    /// Returns [`ControlSurfaceError`] when the surface cannot start.
    async fn start(&self, on_ready: ReadyCallback) -> ControlSurfaceResult<()>;
}

/// Errors returned by event bridge implementations.
#[derive(Debug, Clone, Error)]
pub enum EventBridgeError {
    /// Bridge state could not be read.
    #[error("event bridge error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventBridgeError {
    /// Wraps a bridge persistence failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Errors returned by control surface implementations.
#[derive(Debug, Clone, Error)]
pub enum ControlSurfaceError {
    /// The surface failed to start.
    #[error("control surface failed to start: {0}")]
    Startup(Arc<dyn std::error::Error + Send + Sync>),
}

impl ControlSurfaceError {
    /// Wraps a startup failure.
    pub fn startup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Startup(Arc::new(err))
    }
}

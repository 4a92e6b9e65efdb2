//! In-memory event bridge and a control surface that is ready at once.

use crate::framework::{
    domain::FrameworkId,
    ports::{
        ControlSurface, ControlSurfaceError, ControlSurfaceResult, EventBridge,
        EventBridgeResult, ReadyCallback,
    },
};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Event bridge holding an optional prior framework id and a ready flag.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventBridge {
    framework_id: Option<FrameworkId>,
    ready: Arc<AtomicBool>,
}

impl InMemoryEventBridge {
    /// Creates a bridge for a framework that never registered before.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier reported from a prior registration.
    #[must_use]
    pub fn with_framework_id(mut self, framework_id: FrameworkId) -> Self {
        self.framework_id = Some(framework_id);
        self
    }

    /// Returns whether offers are being accepted.
    #[must_use]
    pub fn is_ready_to_accept_offers(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

#[async_trait]
impl EventBridge for InMemoryEventBridge {
    async fn fetch_framework_id(&self) -> EventBridgeResult<Option<FrameworkId>> {
        Ok(self.framework_id.clone())
    }

    fn set_ready_to_accept_offers(&self) {
        self.ready.store(true, Ordering::Release);
    }
}

/// Control surface that starts instantly and fires its readiness callback
/// before returning.
#[derive(Debug, Clone, Default)]
pub struct ImmediateControlSurface {
    failure: Option<String>,
    started: Arc<AtomicBool>,
}

impl ImmediateControlSurface {
    /// Creates a surface that starts successfully.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface whose start fails with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            started: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns whether the surface was started.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }
}

#[async_trait]
impl ControlSurface for ImmediateControlSurface {
    async fn start(&self, on_ready: ReadyCallback) -> ControlSurfaceResult<()> {
        if let Some(message) = &self.failure {
            return Err(ControlSurfaceError::startup(std::io::Error::other(
                message.clone(),
            )));
        }
        self.started.store(true, Ordering::Release);
        on_ready();
        Ok(())
    }
}

//! Live service handles and their lifecycle state.

use super::{ParseServiceLifecycleStateError, ServiceId, ServiceRegistryDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt;

/// Lifecycle state of a service handle held by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceLifecycleState {
    /// The service is running normally and receives offers.
    Active,
    /// Removal was requested; the service is draining its workload.
    Draining,
    /// Cleanup completed and the service left the registry.
    Removed,
}

impl ServiceLifecycleState {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Draining => "draining",
            Self::Removed => "removed",
        }
    }

    /// Returns whether the service is uninstalling.
    #[must_use]
    pub const fn is_draining(self) -> bool {
        matches!(self, Self::Draining)
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Active, Self::Draining | Self::Removed) | (Self::Draining, Self::Removed)
        )
    }
}

impl fmt::Display for ServiceLifecycleState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceLifecycleState {
    type Error = ParseServiceLifecycleStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "draining" => Ok(Self::Draining),
            "removed" => Ok(Self::Removed),
            _ => Err(ParseServiceLifecycleStateError(value.to_owned())),
        }
    }
}

/// A runnable service built by a `ServiceBuilder`, tagged with its identity
/// and lifecycle state.
///
/// Handles returned by the registry are always derived from data that the
/// builder accepted moments earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHandle<S> {
    id: ServiceId,
    service: S,
    state: ServiceLifecycleState,
    state_changed_at: DateTime<Utc>,
}

impl<S> ServiceHandle<S> {
    /// Wraps a freshly built service in the `Active` state.
    #[must_use]
    pub fn new(id: ServiceId, service: S, clock: &impl Clock) -> Self {
        Self {
            id,
            service,
            state: ServiceLifecycleState::Active,
            state_changed_at: clock.utc(),
        }
    }

    /// Returns the service identifier.
    #[must_use]
    pub const fn id(&self) -> &ServiceId {
        &self.id
    }

    /// Returns the runnable service.
    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Consumes the handle and returns the runnable service.
    #[must_use]
    pub fn into_service(self) -> S {
        self.service
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn lifecycle_state(&self) -> ServiceLifecycleState {
        self.state
    }

    /// Returns whether the service is uninstalling.
    #[must_use]
    pub const fn is_draining(&self) -> bool {
        self.state.is_draining()
    }

    /// Returns when the lifecycle state last changed.
    #[must_use]
    pub const fn state_changed_at(&self) -> DateTime<Utc> {
        self.state_changed_at
    }

    /// Marks the service as draining after an uninstall request.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryDomainError::InvalidLifecycleTransition`] when
    /// the service is not active.
    pub fn begin_draining(&mut self, clock: &impl Clock) -> Result<(), ServiceRegistryDomainError> {
        self.transition_to(ServiceLifecycleState::Draining, clock)
    }

    /// Marks the service as removed once cleanup completed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryDomainError::InvalidLifecycleTransition`] when
    /// the service was already removed.
    pub fn mark_removed(&mut self, clock: &impl Clock) -> Result<(), ServiceRegistryDomainError> {
        self.transition_to(ServiceLifecycleState::Removed, clock)
    }

    fn transition_to(
        &mut self,
        target_state: ServiceLifecycleState,
        clock: &impl Clock,
    ) -> Result<(), ServiceRegistryDomainError> {
        if !self.state.can_transition_to(target_state) {
            return Err(ServiceRegistryDomainError::InvalidLifecycleTransition {
                service_id: self.id.as_str().to_owned(),
                from: self.state.as_str().to_owned(),
                to: target_state.as_str().to_owned(),
            });
        }

        self.state = target_state;
        self.state_changed_at = clock.utc();
        Ok(())
    }
}

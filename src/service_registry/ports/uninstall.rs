//! Notification port fired once a service finished uninstalling.

use crate::service_registry::domain::ServiceId;
use async_trait::async_trait;

/// Receives uninstall-completion notifications from the service lifecycle
/// machinery.
///
/// Fired exactly once per service, after it has drained. Implementations
/// report their own failures; the notifier does not act on them.
#[async_trait]
pub trait UninstallCallback: Send + Sync {
    /// Handles completion of the uninstall of `service_id`.
    async fn uninstalled(&self, service_id: &ServiceId);
}

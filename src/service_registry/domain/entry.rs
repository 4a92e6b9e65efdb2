//! Durable registry record for one service.

use super::{SanitizedKey, ServiceContext, ServiceId};

/// One logical entry of the registry as it exists in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    id: ServiceId,
    context: Option<ServiceContext>,
}

impl ServiceEntry {
    /// Creates an entry from its identifier and optional context.
    #[must_use]
    pub const fn new(id: ServiceId, context: Option<ServiceContext>) -> Self {
        Self { id, context }
    }

    /// Returns the raw service identifier.
    #[must_use]
    pub const fn id(&self) -> &ServiceId {
        &self.id
    }

    /// Returns the storage key derived from the identifier.
    #[must_use]
    pub fn sanitized_key(&self) -> SanitizedKey {
        self.id.sanitized_key()
    }

    /// Returns the stored context, or `None` when the service was added
    /// without one.
    #[must_use]
    pub const fn context(&self) -> Option<&ServiceContext> {
        self.context.as_ref()
    }

    /// Splits the entry into its identifier and context.
    #[must_use]
    pub fn into_parts(self) -> (ServiceId, Option<ServiceContext>) {
        (self.id, self.context)
    }
}

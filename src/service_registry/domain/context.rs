//! Bounded, opaque recovery context for a registered service.

use super::{ServiceId, ServiceRegistryDomainError};

/// Maximum accepted context size, in bytes (100 KiB).
///
/// Contexts are expected to be small descriptors (a file name, a short JSON
/// document); the limit keeps every entry well below the node size limit of
/// the backing store.
pub const CONTEXT_LENGTH_LIMIT_BYTES: usize = 100 * 1024;

/// Opaque caller-defined bytes used to rebuild a service after a restart.
///
/// The registry never interprets the payload. The only check applied is the
/// [`CONTEXT_LENGTH_LIMIT_BYTES`] bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceContext(Vec<u8>);

impl ServiceContext {
    /// Validates the size of a context supplied for `service_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryDomainError::ContextTooLarge`] when `bytes`
    /// is longer than [`CONTEXT_LENGTH_LIMIT_BYTES`].
    pub fn new(service_id: &ServiceId, bytes: Vec<u8>) -> Result<Self, ServiceRegistryDomainError> {
        if bytes.len() > CONTEXT_LENGTH_LIMIT_BYTES {
            return Err(ServiceRegistryDomainError::ContextTooLarge {
                service_id: service_id.as_str().to_owned(),
                size: bytes.len(),
                limit: CONTEXT_LENGTH_LIMIT_BYTES,
            });
        }
        Ok(Self(bytes))
    }

    /// Wraps bytes read back from storage.
    ///
    /// Persisted contexts were bounded when written, so no check is repeated.
    #[must_use]
    pub(crate) const fn from_persisted(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the context payload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the context and returns the payload.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for ServiceContext {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

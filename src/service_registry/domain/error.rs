//! Error types for service registry domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or transitioning registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceRegistryDomainError {
    /// The recovery context exceeds the storage limit.
    #[error("rejected: too large: context for service '{service_id}' is {size} bytes, but limit is {limit} bytes")]
    ContextTooLarge {
        /// Raw identifier of the offending service.
        service_id: String,
        /// Size of the supplied context in bytes.
        size: usize,
        /// Maximum accepted size in bytes.
        limit: usize,
    },

    /// Transitioning between two lifecycle states is invalid.
    #[error("invalid service lifecycle transition for '{service_id}': {from} -> {to}")]
    InvalidLifecycleTransition {
        /// Raw identifier of the service.
        service_id: String,
        /// Current lifecycle state.
        from: String,
        /// Requested target lifecycle state.
        to: String,
    },

    /// The service is still draining and cannot be replaced yet.
    #[error("service '{service_id}' is already uninstalling")]
    AlreadyUninstalling {
        /// Raw identifier of the draining service.
        service_id: String,
    },
}

/// Error returned while parsing a lifecycle state from its string form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown service lifecycle state: {0}")]
pub struct ParseServiceLifecycleStateError(pub String);

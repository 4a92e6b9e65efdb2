//! Error types for framework domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing framework registration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameworkDomainError {
    /// The framework name is empty after trimming.
    #[error("framework name must not be empty")]
    EmptyFrameworkName,

    /// The principal is empty after trimming.
    #[error("framework principal must not be empty")]
    EmptyPrincipal,

    /// The run-as user is empty after trimming.
    #[error("framework user must not be empty")]
    EmptyUser,

    /// The primary role is empty after trimming.
    #[error("framework role must not be empty")]
    EmptyRole,

    /// A pre-reserved role is empty after trimming.
    #[error("pre-reserved role at position {0} must not be empty")]
    EmptyPreReservedRole(usize),

    /// The `ZooKeeper` address is not a `host:port` pair.
    #[error("invalid ZooKeeper address '{0}', expected host:port")]
    InvalidZookeeperHostPort(String),

    /// The framework identifier is empty after trimming.
    #[error("framework id must not be empty")]
    EmptyFrameworkId,
}

/// Error returned while parsing a driver status from its string form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown driver status: {0}")]
pub struct ParseDriverStatusError(pub String);

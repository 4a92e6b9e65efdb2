//! Cluster connection for the framework hosting every service.
//!
//! The framework registers once with the cluster under a descriptor whose
//! roles and capabilities are negotiated from local settings and what the
//! cluster reports. When the driver terminates, the runner decides whether
//! the process keeps serving (after a deliberate stop during uninstall) or
//! must exit. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

//! Persistent registry of the services multiplexed over one framework.
//!
//! The registry durably records which services exist together with an opaque
//! recovery context, and rebuilds every one of them after a scheduler
//! restart. A service is only written to storage after it has been built
//! successfully from exactly the data being stored. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

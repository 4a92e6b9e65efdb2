//! Port contracts for the service registry.
//!
//! Ports define the storage, service construction, routing, and uninstall
//! notification seams the registry is wired through.

mod builder;
mod router;
mod store;
mod uninstall;

pub use builder::{ServiceBuildError, ServiceBuildResult, ServiceBuilder};
pub use router::{ServiceRouter, ServiceRouterError, ServiceRouterResult};
pub use store::{KeyValueStore, KeyValueStoreError, KeyValueStoreResult, StoreValues};
pub use uninstall::UninstallCallback;

#[cfg(test)]
pub use store::MockKeyValueStore;

//! In-memory adapters for the service registry ports.
//!
//! These adapters back unit and integration tests and local deterministic
//! runs. They keep all state behind `Arc<RwLock<_>>` so clones share data.

mod router;
mod store;

pub use router::InMemoryServiceRouter;
pub use store::InMemoryKeyValueStore;

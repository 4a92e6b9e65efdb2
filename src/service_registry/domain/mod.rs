//! Domain model for the persistent service registry.
//!
//! The registry domain models service identity, storage-safe keys, bounded
//! recovery contexts, and the lifecycle of live service handles. Storage and
//! scheduling concerns are kept outside the domain boundary.

mod context;
mod entry;
mod error;
mod handle;
mod ids;

pub use context::{CONTEXT_LENGTH_LIMIT_BYTES, ServiceContext};
pub use entry::ServiceEntry;
pub use error::{ParseServiceLifecycleStateError, ServiceRegistryDomainError};
pub use handle::{ServiceHandle, ServiceLifecycleState};
pub use ids::{SanitizedKey, ServiceId};

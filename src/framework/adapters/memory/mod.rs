//! In-memory adapters for driving the framework runner without a cluster.

mod bridge;
mod driver;
mod probe;

pub use bridge::{ImmediateControlSurface, InMemoryEventBridge};
pub use driver::{Registration, ScriptedClusterDriver};
pub use probe::StaticCapabilityProbe;

//! Port contracts for the cluster connection.
//!
//! Ports define the driver, capability probe, event bridge, and control
//! surface the framework runner is wired through.

mod bridge;
mod driver;
mod probe;

pub use bridge::{
    ControlSurface, ControlSurfaceError, ControlSurfaceResult, EventBridge, EventBridgeError,
    EventBridgeResult, ReadyCallback,
};
pub use driver::{ClusterDriver, ClusterDriverError, ClusterDriverResult};
pub use probe::{CapabilityProbe, CapabilityProbeError, CapabilityProbeResult};

#[cfg(test)]
pub use bridge::{MockControlSurface, MockEventBridge};
#[cfg(test)]
pub use driver::MockClusterDriver;
#[cfg(test)]
pub use probe::MockCapabilityProbe;

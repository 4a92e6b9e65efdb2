//! Shared world state for framework negotiation BDD scenarios.

use ensemble::framework::{
    adapters::memory::Registration,
    domain::{ConnectionOutcome, DriverStatus, FrameworkConfig},
};
use rstest::fixture;

/// Scenario world for framework negotiation behaviour tests.
#[derive(Default)]
pub struct NegotiationWorld {
    /// Framework configuration under construction.
    pub framework: Option<FrameworkConfig>,
    /// Whether the framework asks for GPU resources.
    pub using_gpus: bool,
    /// Whether region awareness is enabled in the scheduler config.
    pub region_awareness_enabled: bool,
    /// Cluster reports GPU resource support.
    pub cluster_gpu: bool,
    /// Cluster reports pre-reserved resource refinement support.
    pub cluster_pre_reserved: bool,
    /// Cluster reports region awareness support.
    pub cluster_region: bool,
    /// Status the scripted driver terminates with.
    pub driver_status: Option<DriverStatus>,
    /// Registration captured by the driver.
    pub registration: Option<Registration>,
    /// Outcome of the connection.
    pub outcome: Option<ConnectionOutcome>,
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> NegotiationWorld {
    NegotiationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

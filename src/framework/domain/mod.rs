//! Domain model for registering the framework with the cluster.

mod capabilities;
mod config;
mod descriptor;
mod error;
mod status;

pub use capabilities::ClusterCapabilities;
pub use config::{
    DEFAULT_USER, FrameworkConfig, RawFrameworkConfig, RunnerSettings, SchedulerConfig,
};
pub use descriptor::{
    FAILOVER_TIMEOUT_SECONDS, FrameworkCapability, FrameworkId, RegistrationDescriptor,
    RoleAssignment,
};
pub use error::{FrameworkDomainError, ParseDriverStatusError};
pub use status::{ConnectionOutcome, DriverStatus};

//! Application services for the cluster connection.

mod runner;

pub use runner::{FrameworkRunner, FrameworkRunnerError, FrameworkRunnerResult};

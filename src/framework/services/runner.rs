//! Framework runner owning the single cluster connection.
//!
//! [`FrameworkRunner`] starts the control surface, negotiates capabilities,
//! registers with the cluster, and decides what the end of the connection
//! means for the process.

use crate::framework::{
    domain::{
        ClusterCapabilities, ConnectionOutcome, FrameworkId, RegistrationDescriptor,
        RunnerSettings,
    },
    ports::{
        CapabilityProbe, CapabilityProbeError, ClusterDriver, ClusterDriverError,
        ControlSurface, ControlSurfaceError, EventBridge, EventBridgeError,
    },
};
use crate::process_exit::ProcessExit;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Service-level errors raised before the connection reached a terminal
/// status.
#[derive(Debug, Error)]
pub enum FrameworkRunnerError {
    /// The control surface failed to start.
    #[error(transparent)]
    ControlSurface(#[from] ControlSurfaceError),
    /// The prior framework id could not be read.
    #[error(transparent)]
    EventBridge(#[from] EventBridgeError),
    /// Cluster capabilities could not be determined.
    #[error(transparent)]
    Probe(#[from] CapabilityProbeError),
    /// The driver failed to run.
    #[error(transparent)]
    Driver(#[from] ClusterDriverError),
}

impl FrameworkRunnerError {
    /// Returns the exit code a startup path should terminate with.
    #[must_use]
    pub const fn exit_code(&self) -> ProcessExit {
        match self {
            Self::ControlSurface(_) => ProcessExit::ApiServerError,
            Self::EventBridge(_) | Self::Probe(_) | Self::Driver(_) => {
                ProcessExit::RegistrationFailure
            }
        }
    }
}

/// Result type for framework runner operations.
pub type FrameworkRunnerResult<T> = Result<T, FrameworkRunnerError>;

/// Registers the framework and runs its one cluster connection.
///
/// Running consumes the runner, so an instance drives at most one
/// connection. Keeping a single runner per process is up to the embedding
/// binary.
pub struct FrameworkRunner<D, P, E, S>
where
    D: ClusterDriver,
    P: CapabilityProbe,
    E: EventBridge + 'static,
    S: ControlSurface,
{
    settings: RunnerSettings,
    driver: Arc<D>,
    probe: Arc<P>,
    bridge: Arc<E>,
    surface: Arc<S>,
}

impl<D, P, E, S> FrameworkRunner<D, P, E, S>
where
    D: ClusterDriver,
    P: CapabilityProbe,
    E: EventBridge + 'static,
    S: ControlSurface,
{
    /// Creates a runner from settings and its collaborators.
    #[must_use]
    pub const fn new(
        settings: RunnerSettings,
        driver: Arc<D>,
        probe: Arc<P>,
        bridge: Arc<E>,
        surface: Arc<S>,
    ) -> Self {
        Self {
            settings,
            driver,
            probe,
            bridge,
            surface,
        }
    }

    /// Returns the runner settings.
    #[must_use]
    pub const fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// Builds the registration descriptor for the given cluster report.
    #[must_use]
    pub fn build_descriptor(
        &self,
        capabilities: &ClusterCapabilities,
        framework_id: Option<FrameworkId>,
    ) -> RegistrationDescriptor {
        RegistrationDescriptor::negotiate(&self.settings, capabilities, framework_id)
    }

    /// Registers with the cluster and runs until the driver terminates.
    ///
    /// The control surface is started first; once it reports ready, the
    /// event bridge begins accepting offers. The returned outcome tells the
    /// caller whether the process may keep running.
    ///
    /// # Errors
    ///
    /// Returns [`FrameworkRunnerError`] when the surface fails to start, the
    /// prior framework id cannot be read, the probe fails, or the driver
    /// cannot run. Nothing is retried.
    pub async fn register_and_run(self) -> FrameworkRunnerResult<ConnectionOutcome> {
        let bridge = Arc::clone(&self.bridge);
        self.surface
            .start(Box::new(move || bridge.set_ready_to_accept_offers()))
            .await?;

        let framework_id = self.bridge.fetch_framework_id().await?;
        let capabilities = self.probe.probe().await?;
        let descriptor = self.build_descriptor(&capabilities, framework_id);
        tracing::info!(
            name = descriptor.name(),
            framework_id = ?descriptor.framework_id(),
            roles = ?descriptor.roles(),
            capabilities = ?descriptor.capabilities(),
            "registering framework"
        );

        let master_uri = self.settings.framework().master_uri();
        let status = self.driver.run(&descriptor, &master_uri).await?;

        let outcome = ConnectionOutcome::from(status);
        match outcome {
            ConnectionOutcome::Drained => tracing::info!(
                status = %status,
                "scheduler driver stopped, continuing to serve uninstall status"
            ),
            ConnectionOutcome::Disconnected(_) => {
                tracing::error!(status = %status, "scheduler driver exited");
            }
        }
        Ok(outcome)
    }

    /// Runs the connection and terminates the process unless it drained.
    ///
    /// Startup failures exit with [`FrameworkRunnerError::exit_code`]; any
    /// driver status other than stopped exits with
    /// [`ProcessExit::DriverExited`].
    pub async fn run_or_exit(self) {
        match self.register_and_run().await {
            Ok(outcome) => {
                if let Some(exit) = outcome.required_exit() {
                    exit.exit();
                }
            }
            Err(err) => err.exit_code().exit_with_error(&err),
        }
    }
}

impl<D, P, E, S> FrameworkRunner<D, P, E, S>
where
    D: ClusterDriver + 'static,
    P: CapabilityProbe + 'static,
    E: EventBridge + 'static,
    S: ControlSurface + 'static,
{
    /// Runs [`Self::register_and_run`] on a dedicated tokio task.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<FrameworkRunnerResult<ConnectionOutcome>> {
        tokio::spawn(self.register_and_run())
    }
}

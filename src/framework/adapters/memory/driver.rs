//! Cluster driver that records registrations and returns a scripted status.

use crate::framework::{
    domain::{DriverStatus, RegistrationDescriptor},
    ports::{ClusterDriver, ClusterDriverError, ClusterDriverResult},
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

/// One registration attempt observed by [`ScriptedClusterDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Descriptor passed to the driver.
    pub descriptor: RegistrationDescriptor,
    /// Master URI the driver was pointed at.
    pub master_uri: String,
}

/// Driver that returns immediately with a preconfigured result.
#[derive(Debug, Clone)]
pub struct ScriptedClusterDriver {
    outcome: ClusterDriverResult<DriverStatus>,
    registrations: Arc<Mutex<Vec<Registration>>>,
}

impl ScriptedClusterDriver {
    /// Creates a driver whose run loop ends with `status`.
    #[must_use]
    pub fn exiting_with(status: DriverStatus) -> Self {
        Self::scripted(Ok(status))
    }

    /// Creates a driver that fails to start with `err`.
    #[must_use]
    pub fn failing_with(err: ClusterDriverError) -> Self {
        Self::scripted(Err(err))
    }

    fn scripted(outcome: ClusterDriverResult<DriverStatus>) -> Self {
        Self {
            outcome,
            registrations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns every registration attempted so far.
    #[must_use]
    pub fn registrations(&self) -> Vec<Registration> {
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ClusterDriver for ScriptedClusterDriver {
    async fn run(
        &self,
        descriptor: &RegistrationDescriptor,
        master_uri: &str,
    ) -> ClusterDriverResult<DriverStatus> {
        self.registrations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Registration {
                descriptor: descriptor.clone(),
                master_uri: master_uri.to_owned(),
            });
        self.outcome.clone()
    }
}

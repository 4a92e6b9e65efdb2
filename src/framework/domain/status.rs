//! Terminal driver status and what it means for the process.

use super::ParseDriverStatusError;
use crate::process_exit::ProcessExit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status reported by a cluster driver once its run loop returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    /// The driver was never started.
    NotStarted,
    /// The driver returned while still nominally running.
    Running,
    /// The driver aborted, typically after losing the master.
    Aborted,
    /// The driver was stopped deliberately, as during uninstall.
    Stopped,
}

impl DriverStatus {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "DRIVER_NOT_STARTED",
            Self::Running => "DRIVER_RUNNING",
            Self::Aborted => "DRIVER_ABORTED",
            Self::Stopped => "DRIVER_STOPPED",
        }
    }

    /// Returns whether the driver was stopped deliberately.
    #[must_use]
    pub const fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DriverStatus {
    type Error = ParseDriverStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        let unprefixed = normalized
            .strip_prefix("DRIVER_")
            .unwrap_or(normalized.as_str());
        match unprefixed {
            "NOT_STARTED" => Ok(Self::NotStarted),
            "RUNNING" => Ok(Self::Running),
            "ABORTED" => Ok(Self::Aborted),
            "STOPPED" => Ok(Self::Stopped),
            _ => Err(ParseDriverStatusError(value.to_owned())),
        }
    }
}

/// Classification of a finished cluster connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOutcome {
    /// The driver was stopped deliberately; the process keeps running so the
    /// control surface can report uninstall completion.
    Drained,
    /// The connection ended for any other reason and the process must exit.
    Disconnected(DriverStatus),
}

impl ConnectionOutcome {
    /// Returns the exit the process must take, if any.
    #[must_use]
    pub const fn required_exit(self) -> Option<ProcessExit> {
        match self {
            Self::Drained => None,
            Self::Disconnected(_) => Some(ProcessExit::DriverExited),
        }
    }
}

impl From<DriverStatus> for ConnectionOutcome {
    fn from(status: DriverStatus) -> Self {
        if status.is_stopped() {
            Self::Drained
        } else {
            Self::Disconnected(status)
        }
    }
}

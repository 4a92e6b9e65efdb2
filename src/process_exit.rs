//! Process exit codes and the single termination chokepoint.
//!
//! Every deliberate termination goes through [`ProcessExit::exit`] or
//! [`ProcessExit::exit_with_error`], so operators can tell from the exit code
//! why the scheduler stopped. Codes 3, 4, 7, 10, and 12 are reserved and must
//! not be reused.

use std::fmt;
use thiserror::Error;

/// Reason the scheduler process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessExit {
    /// Normal completion.
    Success,
    /// Startup failed before registration.
    InitializationFailure,
    /// Registration with the cluster failed.
    RegistrationFailure,
    /// The cluster connection was lost.
    Disconnected,
    /// Unclassified fatal error.
    Error,
    /// Another scheduler instance holds the leadership lock.
    LockUnavailable,
    /// The control surface failed.
    ApiServerError,
    /// Uninstall was already in progress at startup.
    AlreadyUninstalling,
    /// The cluster driver terminated without being stopped.
    DriverExited,
}

/// Error returned when an integer is not a known exit code.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("unknown process exit code: {0}")]
pub struct UnknownExitCodeError(pub i32);

impl ProcessExit {
    /// Every exit code, in ascending numeric order.
    pub const ALL: [Self; 9] = [
        Self::Success,
        Self::InitializationFailure,
        Self::RegistrationFailure,
        Self::Disconnected,
        Self::Error,
        Self::LockUnavailable,
        Self::ApiServerError,
        Self::AlreadyUninstalling,
        Self::DriverExited,
    ];

    /// Returns the numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InitializationFailure => 1,
            Self::RegistrationFailure => 2,
            Self::Disconnected => 5,
            Self::Error => 6,
            Self::LockUnavailable => 8,
            Self::ApiServerError => 9,
            Self::AlreadyUninstalling => 11,
            Self::DriverExited => 13,
        }
    }

    /// Returns the symbolic name printed in the exit message.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::InitializationFailure => "INITIALIZATION_FAILURE",
            Self::RegistrationFailure => "REGISTRATION_FAILURE",
            Self::Disconnected => "DISCONNECTED",
            Self::Error => "ERROR",
            Self::LockUnavailable => "LOCK_UNAVAILABLE",
            Self::ApiServerError => "API_SERVER_ERROR",
            Self::AlreadyUninstalling => "SCHEDULER_ALREADY_UNINSTALLING",
            Self::DriverExited => "DRIVER_EXITED",
        }
    }

    /// Returns whether this is the successful exit.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns the line written to both output streams on exit.
    #[must_use]
    pub fn exit_message(self) -> String {
        format!("Process exiting immediately with code: {self}")
    }

    /// Terminates the process immediately with this code.
    ///
    /// Destructors of live values do not run.
    #[expect(
        clippy::print_stdout,
        clippy::print_stderr,
        reason = "the exit line must reach both streams even without a subscriber"
    )]
    pub fn exit(self) -> ! {
        let message = self.exit_message();
        if self.is_success() {
            tracing::info!(code = self.code(), name = self.name(), "process exiting");
        } else {
            tracing::error!(code = self.code(), name = self.name(), "process exiting");
        }
        eprintln!("{message}");
        println!("{message}");
        std::process::exit(self.code())
    }

    /// Reports `err` and its source chain, then terminates with this code.
    #[expect(
        clippy::print_stdout,
        clippy::print_stderr,
        reason = "the failure must reach both streams even without a subscriber"
    )]
    pub fn exit_with_error(self, err: &dyn std::error::Error) -> ! {
        let report = error_report(err);
        tracing::error!(error = %report, "fatal error");
        eprintln!("{report}");
        println!("{report}");
        self.exit()
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name(), self.code())
    }
}

impl TryFrom<i32> for ProcessExit {
    type Error = UnknownExitCodeError;

    fn try_from(code: i32) -> Result<Self, UnknownExitCodeError> {
        Self::ALL
            .into_iter()
            .find(|exit| exit.code() == code)
            .ok_or(UnknownExitCodeError(code))
    }
}

/// Renders an error followed by each `source()` on its own line.
fn error_report(err: &dyn std::error::Error) -> String {
    let mut report = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        report.push_str("\ncaused by: ");
        report.push_str(&cause.to_string());
        source = cause.source();
    }
    report
}

//! Loads runner settings from a JSON file.
//!
//! A representative file is:
//!
//! ```json
//! {
//!   "framework": {
//!     "framework_name": "data-services",
//!     "pre_reserved_roles": ["slave_public"],
//!     "web_url": "http://api.data-services.marathon.l4lb.thisdcos.directory",
//!     "zookeeper_host_port": "master.mesos:2181"
//!   },
//!   "scheduler": { "region_awareness_enabled": true },
//!   "using_gpus": false
//! }
//! ```
//!
//! Omitted `principal`, `role`, and `user` values take the defaults described
//! on [`RawFrameworkConfig`](crate::framework::domain::RawFrameworkConfig).

use crate::framework::domain::RunnerSettings;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use thiserror::Error;

/// Errors returned while loading runner settings.
#[derive(Debug, Error)]
pub enum SettingsLoadError {
    /// The settings file could not be read.
    #[error("failed to read runner settings from {path}: {source}")]
    Read {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The settings file is not valid JSON or fails validation.
    #[error("failed to parse runner settings from {path}: {source}")]
    Parse {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying parse or validation failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and validates [`RunnerSettings`] from the JSON file at `path`.
///
/// Relative paths resolve against the working directory.
///
/// # Errors
///
/// Returns [`SettingsLoadError::Read`] when the file cannot be opened or
/// read, and [`SettingsLoadError::Parse`] when its contents are malformed or
/// name invalid values.
pub fn load_runner_settings(path: &Utf8Path) -> Result<RunnerSettings, SettingsLoadError> {
    let bytes = read_settings_file(path).map_err(|source| SettingsLoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    let settings: RunnerSettings =
        serde_json::from_slice(&bytes).map_err(|source| SettingsLoadError::Parse {
            path: path.to_owned(),
            source,
        })?;

    tracing::debug!(
        path = %path,
        framework = settings.framework().framework_name(),
        "loaded runner settings"
    );
    Ok(settings)
}

fn read_settings_file(path: &Utf8Path) -> io::Result<Vec<u8>> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "settings path has no file name")
    })?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read(file_name)
}

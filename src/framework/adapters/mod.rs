//! Adapter implementations for framework ports and settings loading.

pub mod file;
pub mod memory;

pub use file::{SettingsLoadError, load_runner_settings};

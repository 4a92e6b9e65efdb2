//! Capability probe returning a fixed report.

use crate::framework::{
    domain::ClusterCapabilities,
    ports::{CapabilityProbe, CapabilityProbeResult},
};
use async_trait::async_trait;

/// Probe that always reports the same cluster capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCapabilityProbe {
    capabilities: ClusterCapabilities,
}

impl StaticCapabilityProbe {
    /// Creates a probe reporting `capabilities`.
    #[must_use]
    pub const fn new(capabilities: ClusterCapabilities) -> Self {
        Self { capabilities }
    }
}

#[async_trait]
impl CapabilityProbe for StaticCapabilityProbe {
    async fn probe(&self) -> CapabilityProbeResult<ClusterCapabilities> {
        Ok(self.capabilities)
    }
}

//! Cluster feature support reported by a capability probe.

use serde::{Deserialize, Serialize};

/// Features the connected cluster supports.
///
/// A probe reports these once per registration attempt. Whether a feature is
/// actually advertised also depends on the local configuration; see
/// [`super::RegistrationDescriptor::negotiate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterCapabilities {
    supports_gpu_resource: bool,
    supports_pre_reserved_resources: bool,
    supports_region_awareness: bool,
}

impl ClusterCapabilities {
    /// Creates a capability report.
    #[must_use]
    pub const fn new(
        supports_gpu_resource: bool,
        supports_pre_reserved_resources: bool,
        supports_region_awareness: bool,
    ) -> Self {
        Self {
            supports_gpu_resource,
            supports_pre_reserved_resources,
            supports_region_awareness,
        }
    }

    /// Returns whether the cluster can offer GPU resources.
    #[must_use]
    pub const fn supports_gpu_resource(&self) -> bool {
        self.supports_gpu_resource
    }

    /// Returns whether the cluster supports refining pre-reserved resources.
    #[must_use]
    pub const fn supports_pre_reserved_resources(&self) -> bool {
        self.supports_pre_reserved_resources
    }

    /// Returns whether the cluster reports fault domains with regions.
    #[must_use]
    pub const fn supports_region_awareness(&self) -> bool {
        self.supports_region_awareness
    }
}

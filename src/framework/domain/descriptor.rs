//! Registration descriptor sent when connecting to the cluster.

use super::{ClusterCapabilities, FrameworkDomainError, RunnerSettings};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Failover timeout advertised at registration: two weeks, in seconds.
///
/// The cluster keeps the framework's tasks alive for this long while the
/// scheduler is disconnected.
pub const FAILOVER_TIMEOUT_SECONDS: u64 = 2 * 7 * 24 * 60 * 60;

/// Identifier the cluster assigned at first registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameworkId(String);

impl FrameworkId {
    /// Creates a validated framework identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FrameworkDomainError::EmptyFrameworkId`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, FrameworkDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(FrameworkDomainError::EmptyFrameworkId);
        }
        Ok(Self(trimmed))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Roles the framework registers under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleAssignment {
    /// Legacy single-role registration.
    Single(String),
    /// Multi-role registration: the primary role followed by every
    /// pre-reserved role.
    Multi(Vec<String>),
}

impl RoleAssignment {
    /// Returns every role in registration order.
    #[must_use]
    pub fn roles(&self) -> Vec<&str> {
        match self {
            Self::Single(role) => vec![role.as_str()],
            Self::Multi(roles) => roles.iter().map(String::as_str).collect(),
        }
    }
}

/// Optional cluster feature the framework opts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameworkCapability {
    /// Registration under several roles.
    MultiRole,
    /// Acceptance of GPU resources in offers.
    GpuResources,
    /// Refinement of resources reserved ahead of time.
    ReservationRefinement,
    /// Awareness of region fault domains.
    RegionAware,
}

impl FrameworkCapability {
    /// Returns the canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MultiRole => "MULTI_ROLE",
            Self::GpuResources => "GPU_RESOURCES",
            Self::ReservationRefinement => "RESERVATION_REFINEMENT",
            Self::RegionAware => "REGION_AWARE",
        }
    }
}

impl fmt::Display for FrameworkCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the cluster needs to register (or re-register) the framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDescriptor {
    name: String,
    principal: String,
    user: String,
    failover_timeout_seconds: u64,
    checkpoint: bool,
    framework_id: Option<FrameworkId>,
    roles: RoleAssignment,
    web_url: Option<String>,
    capabilities: Vec<FrameworkCapability>,
}

impl RegistrationDescriptor {
    /// Derives the descriptor from local settings and the cluster's reported
    /// capabilities.
    ///
    /// Capabilities are listed in a fixed order: `MultiRole` when
    /// pre-reserved roles are configured, `GpuResources` when the cluster
    /// supports GPUs and hosted services use them, `ReservationRefinement`
    /// when the cluster supports it, and `RegionAware` when both the cluster
    /// and the scheduler configuration allow it.
    #[must_use]
    pub fn negotiate(
        settings: &RunnerSettings,
        cluster: &ClusterCapabilities,
        framework_id: Option<FrameworkId>,
    ) -> Self {
        let framework = settings.framework();
        let mut capabilities = Vec::new();

        let roles = if framework.pre_reserved_roles().is_empty() {
            RoleAssignment::Single(framework.role().to_owned())
        } else {
            capabilities.push(FrameworkCapability::MultiRole);
            RoleAssignment::Multi(
                std::iter::once(framework.role())
                    .chain(framework.pre_reserved_roles().iter().map(String::as_str))
                    .map(str::to_owned)
                    .collect(),
            )
        };

        if cluster.supports_gpu_resource() && settings.using_gpus() {
            capabilities.push(FrameworkCapability::GpuResources);
        }
        if cluster.supports_pre_reserved_resources() {
            capabilities.push(FrameworkCapability::ReservationRefinement);
        }
        if cluster.supports_region_awareness() && settings.scheduler().is_region_awareness_enabled()
        {
            capabilities.push(FrameworkCapability::RegionAware);
        }

        Self {
            name: framework.framework_name().to_owned(),
            principal: framework.principal().to_owned(),
            user: framework.user().to_owned(),
            failover_timeout_seconds: FAILOVER_TIMEOUT_SECONDS,
            checkpoint: true,
            framework_id,
            roles,
            web_url: framework.web_url().map(str::to_owned),
            capabilities,
        }
    }

    /// Returns the framework name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the authentication principal.
    #[must_use]
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Returns the user tasks run as.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the failover timeout in seconds.
    #[must_use]
    pub const fn failover_timeout_seconds(&self) -> u64 {
        self.failover_timeout_seconds
    }

    /// Returns whether agents checkpoint task state. Always `true`.
    #[must_use]
    pub const fn checkpoint(&self) -> bool {
        self.checkpoint
    }

    /// Returns the identifier from a prior registration, if any.
    #[must_use]
    pub const fn framework_id(&self) -> Option<&FrameworkId> {
        self.framework_id.as_ref()
    }

    /// Returns the role assignment.
    #[must_use]
    pub const fn roles(&self) -> &RoleAssignment {
        &self.roles
    }

    /// Returns the web UI URL, if configured.
    #[must_use]
    pub fn web_url(&self) -> Option<&str> {
        self.web_url.as_deref()
    }

    /// Returns the negotiated capabilities in registration order.
    #[must_use]
    pub fn capabilities(&self) -> &[FrameworkCapability] {
        &self.capabilities
    }

    /// Returns whether `capability` was negotiated.
    #[must_use]
    pub fn has_capability(&self, capability: FrameworkCapability) -> bool {
        self.capabilities.contains(&capability)
    }
}

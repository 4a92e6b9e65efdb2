//! Validated framework and scheduler configuration.

use super::FrameworkDomainError;
use serde::{Deserialize, Serialize};

/// Run-as user applied when the configuration does not name one.
pub const DEFAULT_USER: &str = "nobody";

/// Identity and placement settings used to register the framework.
///
/// Deserialization goes through the same validation as
/// [`FrameworkConfig::new`], so a loaded configuration is always usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFrameworkConfig")]
pub struct FrameworkConfig {
    framework_name: String,
    principal: String,
    user: String,
    role: String,
    pre_reserved_roles: Vec<String>,
    web_url: Option<String>,
    zookeeper_host_port: String,
}

/// Unvalidated shape accepted from configuration files.
///
/// `principal` and `role` default to `<framework_name>-principal` and
/// `<framework_name>-role`; `user` defaults to [`DEFAULT_USER`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFrameworkConfig {
    framework_name: String,
    #[serde(default)]
    principal: Option<String>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    pre_reserved_roles: Vec<String>,
    #[serde(default)]
    web_url: Option<String>,
    zookeeper_host_port: String,
}

impl FrameworkConfig {
    /// Creates a validated configuration without pre-reserved roles or a web
    /// URL.
    ///
    /// All values are trimmed.
    ///
    /// # Errors
    ///
    /// Returns a [`FrameworkDomainError`] naming the first blank field, or
    /// [`FrameworkDomainError::InvalidZookeeperHostPort`] when the address is
    /// not a `host:port` pair.
    pub fn new(
        framework_name: impl Into<String>,
        principal: impl Into<String>,
        user: impl Into<String>,
        role: impl Into<String>,
        zookeeper_host_port: impl Into<String>,
    ) -> Result<Self, FrameworkDomainError> {
        let name = required(framework_name, FrameworkDomainError::EmptyFrameworkName)?;
        let validated_principal = required(principal, FrameworkDomainError::EmptyPrincipal)?;
        let validated_user = required(user, FrameworkDomainError::EmptyUser)?;
        let validated_role = required(role, FrameworkDomainError::EmptyRole)?;
        let zookeeper = validate_host_port(zookeeper_host_port.into())?;

        Ok(Self {
            framework_name: name,
            principal: validated_principal,
            user: validated_user,
            role: validated_role,
            pre_reserved_roles: Vec::new(),
            web_url: None,
            zookeeper_host_port: zookeeper,
        })
    }

    /// Sets the roles whose resources were reserved ahead of time.
    ///
    /// # Errors
    ///
    /// Returns [`FrameworkDomainError::EmptyPreReservedRole`] when any role
    /// is blank.
    pub fn with_pre_reserved_roles(
        mut self,
        roles: impl IntoIterator<Item = String>,
    ) -> Result<Self, FrameworkDomainError> {
        self.pre_reserved_roles = roles
            .into_iter()
            .enumerate()
            .map(|(position, role)| {
                let trimmed = role.trim().to_owned();
                if trimmed.is_empty() {
                    Err(FrameworkDomainError::EmptyPreReservedRole(position))
                } else {
                    Ok(trimmed)
                }
            })
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Sets the web UI URL. A blank URL clears it.
    #[must_use]
    pub fn with_web_url(mut self, web_url: impl Into<String>) -> Self {
        let trimmed = web_url.into().trim().to_owned();
        self.web_url = (!trimmed.is_empty()).then_some(trimmed);
        self
    }

    /// Returns the framework name.
    #[must_use]
    pub fn framework_name(&self) -> &str {
        &self.framework_name
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

    /// Returns the primary role.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the pre-reserved roles, possibly empty.
    #[must_use]
    pub fn pre_reserved_roles(&self) -> &[String] {
        &self.pre_reserved_roles
    }

    /// Returns the web UI URL, if configured.
    #[must_use]
    pub fn web_url(&self) -> Option<&str> {
        self.web_url.as_deref()
    }

    /// Returns the `ZooKeeper` `host:port` used to locate the master.
    #[must_use]
    pub fn zookeeper_host_port(&self) -> &str {
        &self.zookeeper_host_port
    }

    /// Returns the master discovery URI, `zk://<host:port>/mesos`.
    #[must_use]
    pub fn master_uri(&self) -> String {
        format!("zk://{}/mesos", self.zookeeper_host_port)
    }
}

impl TryFrom<RawFrameworkConfig> for FrameworkConfig {
    type Error = FrameworkDomainError;

    fn try_from(raw: RawFrameworkConfig) -> Result<Self, Self::Error> {
        let name = raw.framework_name.trim().to_owned();
        let principal = raw
            .principal
            .unwrap_or_else(|| format!("{name}-principal"));
        let role = raw.role.unwrap_or_else(|| format!("{name}-role"));
        let user = raw.user.unwrap_or_else(|| DEFAULT_USER.to_owned());

        Ok(
            Self::new(name, principal, user, role, raw.zookeeper_host_port)?
                .with_pre_reserved_roles(raw.pre_reserved_roles)?
                .with_web_url(raw.web_url.unwrap_or_default()),
        )
    }
}

/// Scheduler-wide toggles consulted during capability negotiation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    region_awareness_enabled: bool,
}

impl SchedulerConfig {
    /// Creates a scheduler configuration.
    #[must_use]
    pub const fn new(region_awareness_enabled: bool) -> Self {
        Self {
            region_awareness_enabled,
        }
    }

    /// Returns whether the scheduler may place work across regions.
    #[must_use]
    pub const fn is_region_awareness_enabled(&self) -> bool {
        self.region_awareness_enabled
    }
}

/// Everything a framework runner needs besides its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSettings {
    framework: FrameworkConfig,
    #[serde(default)]
    scheduler: SchedulerConfig,
    #[serde(default)]
    using_gpus: bool,
}

impl RunnerSettings {
    /// Bundles framework and scheduler settings.
    #[must_use]
    pub const fn new(framework: FrameworkConfig, scheduler: SchedulerConfig) -> Self {
        Self {
            framework,
            scheduler,
            using_gpus: false,
        }
    }

    /// Declares whether any hosted service consumes GPU resources.
    #[must_use]
    pub const fn with_gpus(mut self, using_gpus: bool) -> Self {
        self.using_gpus = using_gpus;
        self
    }

    /// Returns the framework configuration.
    #[must_use]
    pub const fn framework(&self) -> &FrameworkConfig {
        &self.framework
    }

    /// Returns the scheduler configuration.
    #[must_use]
    pub const fn scheduler(&self) -> &SchedulerConfig {
        &self.scheduler
    }

    /// Returns whether hosted services consume GPU resources.
    #[must_use]
    pub const fn using_gpus(&self) -> bool {
        self.using_gpus
    }
}

fn required(
    value: impl Into<String>,
    blank: FrameworkDomainError,
) -> Result<String, FrameworkDomainError> {
    let trimmed = value.into().trim().to_owned();
    if trimmed.is_empty() {
        return Err(blank);
    }
    Ok(trimmed)
}

fn validate_host_port(raw: String) -> Result<String, FrameworkDomainError> {
    let trimmed = raw.trim();
    let is_valid = trimmed.rsplit_once(':').is_some_and(|(host, port)| {
        !host.is_empty() && port.parse::<u16>().is_ok_and(|number| number != 0)
    });
    if !is_valid {
        return Err(FrameworkDomainError::InvalidZookeeperHostPort(raw));
    }
    Ok(trimmed.to_owned())
}

//! Shared world state for service registry BDD scenarios.

use async_trait::async_trait;
use ensemble::service_registry::{
    adapters::memory::InMemoryKeyValueStore,
    domain::{ServiceContext, ServiceHandle, ServiceId},
    ports::{ServiceBuildError, ServiceBuildResult, ServiceBuilder},
    services::{ServiceRegistry, ServiceRegistryError},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Context the scenario builder refuses to build.
pub const BROKEN_SPEC: &str = "broken.yml";

/// Runnable service produced in scenarios: the context read as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioService {
    /// Context text, if any.
    pub spec_file: Option<String>,
}

/// Builder reading the context as a UTF-8 spec file name.
#[derive(Debug, Default)]
pub struct ScenarioBuilder;

#[async_trait]
impl ServiceBuilder for ScenarioBuilder {
    type Service = ScenarioService;

    async fn build_service(
        &self,
        _service_id: &ServiceId,
        context: Option<&ServiceContext>,
    ) -> ServiceBuildResult<Self::Service> {
        let spec_file = context
            .map(|ctx| String::from_utf8(ctx.as_bytes().to_vec()))
            .transpose()
            .map_err(ServiceBuildError::new)?;
        if spec_file.as_deref() == Some(BROKEN_SPEC) {
            return Err(ServiceBuildError::message("spec does not parse"));
        }
        Ok(ScenarioService { spec_file })
    }
}

/// Registry type used by the BDD world.
pub type ScenarioRegistry = ServiceRegistry<InMemoryKeyValueStore, ScenarioBuilder, DefaultClock>;

/// Scenario world for service registry behaviour tests.
pub struct RegistryWorld {
    /// Store shared by every registry instance in the scenario.
    pub store: Arc<InMemoryKeyValueStore>,
    /// The registry under test.
    pub registry: ScenarioRegistry,
    /// Result of the last add attempt.
    pub last_put_result: Option<Result<ServiceHandle<ScenarioService>, ServiceRegistryError>>,
    /// Handles returned by the last recovery.
    pub recovered: Vec<ServiceHandle<ScenarioService>>,
}

impl RegistryWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let registry = registry_over(&store);
        Self {
            store,
            registry,
            last_put_result: None,
            recovered: Vec::new(),
        }
    }

    /// Replaces the registry with a fresh instance over the same store.
    pub fn restart(&mut self) {
        self.registry = registry_over(&self.store);
    }
}

impl Default for RegistryWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn registry_over(store: &Arc<InMemoryKeyValueStore>) -> ScenarioRegistry {
    ServiceRegistry::new(
        Arc::clone(store),
        Arc::new(ScenarioBuilder),
        Arc::new(DefaultClock),
    )
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RegistryWorld {
    RegistryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! Shared test helpers for in-memory integration tests.

use async_trait::async_trait;
use ensemble::service_registry::{
    adapters::memory::{InMemoryKeyValueStore, InMemoryServiceRouter},
    domain::{ServiceContext, ServiceId},
    ports::{ServiceBuildError, ServiceBuildResult, ServiceBuilder},
    services::{MultiServiceController, ServiceRegistry},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Context value that [`SpecFileBuilder`] refuses to build.
pub const BROKEN_SPEC: &str = "broken.yml";

/// Runnable service as the embedding application would model it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedService {
    /// Name the service was added under.
    pub name: String,
    /// Spec file named by the context, if one was given.
    pub spec_file: Option<String>,
}

/// Builder treating the context as the UTF-8 name of a spec file.
#[derive(Debug, Default)]
pub struct SpecFileBuilder;

#[async_trait]
impl ServiceBuilder for SpecFileBuilder {
    type Service = HostedService;

    async fn build_service(
        &self,
        service_id: &ServiceId,
        context: Option<&ServiceContext>,
    ) -> ServiceBuildResult<Self::Service> {
        let spec_file = context
            .map(|ctx| String::from_utf8(ctx.as_bytes().to_vec()))
            .transpose()
            .map_err(ServiceBuildError::new)?;
        if spec_file.as_deref() == Some(BROKEN_SPEC) {
            return Err(ServiceBuildError::message(format!(
                "spec file {BROKEN_SPEC} does not parse"
            )));
        }
        Ok(HostedService {
            name: service_id.as_str().to_owned(),
            spec_file,
        })
    }
}

/// Registry type used across integration tests.
pub type TestRegistry = ServiceRegistry<InMemoryKeyValueStore, SpecFileBuilder, DefaultClock>;

/// Controller type used across integration tests.
pub type TestController = MultiServiceController<
    InMemoryKeyValueStore,
    SpecFileBuilder,
    DefaultClock,
    InMemoryServiceRouter<HostedService>,
>;

/// Provides a fresh in-memory store for each test.
#[fixture]
pub fn store() -> Arc<InMemoryKeyValueStore> {
    Arc::new(InMemoryKeyValueStore::new())
}

/// Creates a registry over `store`, as a scheduler process would at start.
#[must_use]
pub fn registry_over(store: &Arc<InMemoryKeyValueStore>) -> TestRegistry {
    ServiceRegistry::new(
        Arc::clone(store),
        Arc::new(SpecFileBuilder),
        Arc::new(DefaultClock),
    )
}

/// Creates a controller and router over `store`.
#[must_use]
pub fn controller_over(
    store: &Arc<InMemoryKeyValueStore>,
) -> (TestController, Arc<InMemoryServiceRouter<HostedService>>) {
    let router = Arc::new(InMemoryServiceRouter::new());
    (
        MultiServiceController::new(registry_over(store), Arc::clone(&router)),
        router,
    )
}

/// Returns the sorted names of `services`.
#[must_use]
pub fn sorted_names(services: impl IntoIterator<Item = HostedService>) -> Vec<String> {
    let mut names: Vec<String> = services.into_iter().map(|service| service.name).collect();
    names.sort_unstable();
    names
}

//! Shared test doubles for registry unit tests.

use crate::service_registry::{
    adapters::memory::{InMemoryKeyValueStore, InMemoryServiceRouter},
    domain::{ServiceContext, ServiceId},
    ports::{MockKeyValueStore, ServiceBuildError, ServiceBuildResult, ServiceBuilder},
    services::{MultiServiceController, ServiceRegistry},
};
use async_trait::async_trait;
use mockable::DefaultClock;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// Service produced by [`RecordingBuilder`], echoing its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct EchoService {
    pub(super) id: ServiceId,
    pub(super) context: Option<Vec<u8>>,
}

/// Builder that records every invocation and rejects configured identifiers.
#[derive(Debug, Default)]
pub(super) struct RecordingBuilder {
    rejected: Mutex<BTreeSet<String>>,
    calls: Mutex<Vec<ServiceId>>,
}

impl RecordingBuilder {
    pub(super) fn reject(&self, raw_id: &str) {
        self.rejected
            .lock()
            .expect("rejected set lock")
            .insert(raw_id.to_owned());
    }

    pub(super) fn allow(&self, raw_id: &str) {
        self.rejected
            .lock()
            .expect("rejected set lock")
            .remove(raw_id);
    }

    pub(super) fn calls(&self) -> Vec<ServiceId> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ServiceBuilder for RecordingBuilder {
    type Service = EchoService;

    async fn build_service(
        &self,
        service_id: &ServiceId,
        context: Option<&ServiceContext>,
    ) -> ServiceBuildResult<Self::Service> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(service_id.clone());
        let is_rejected = self
            .rejected
            .lock()
            .expect("rejected set lock")
            .contains(service_id.as_str());
        if is_rejected {
            return Err(ServiceBuildError::message(format!(
                "cannot build '{service_id}'"
            )));
        }
        Ok(EchoService {
            id: service_id.clone(),
            context: context.map(|ctx| ctx.as_bytes().to_vec()),
        })
    }
}

pub(super) type TestRegistry =
    ServiceRegistry<InMemoryKeyValueStore, RecordingBuilder, DefaultClock>;

pub(super) type MockedRegistry = ServiceRegistry<MockKeyValueStore, RecordingBuilder, DefaultClock>;

pub(super) type TestController = MultiServiceController<
    InMemoryKeyValueStore,
    RecordingBuilder,
    DefaultClock,
    InMemoryServiceRouter<EchoService>,
>;

/// Registry wired to in-memory collaborators that tests can inspect.
pub(super) struct Harness {
    pub(super) store: Arc<InMemoryKeyValueStore>,
    pub(super) builder: Arc<RecordingBuilder>,
    pub(super) registry: TestRegistry,
}

impl Harness {
    pub(super) fn new() -> Self {
        Self::over(Arc::new(InMemoryKeyValueStore::new()))
    }

    /// Builds a second registry over the same store, as after a restart.
    pub(super) fn over(store: Arc<InMemoryKeyValueStore>) -> Self {
        let builder = Arc::new(RecordingBuilder::default());
        let registry = ServiceRegistry::new(
            Arc::clone(&store),
            Arc::clone(&builder),
            Arc::new(DefaultClock),
        );
        Self {
            store,
            builder,
            registry,
        }
    }

    pub(super) fn controller(&self) -> (TestController, Arc<InMemoryServiceRouter<EchoService>>) {
        let router = Arc::new(InMemoryServiceRouter::new());
        (
            MultiServiceController::new(self.registry.clone(), Arc::clone(&router)),
            router,
        )
    }
}

/// Registry over a scripted store for failure injection.
pub(super) fn mocked_registry(store: MockKeyValueStore) -> MockedRegistry {
    ServiceRegistry::new(
        Arc::new(store),
        Arc::new(RecordingBuilder::default()),
        Arc::new(DefaultClock),
    )
}

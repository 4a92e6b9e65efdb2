//! Application services for the persistent service registry.

mod multi_service;
mod registry;

pub use multi_service::{
    MultiServiceController, MultiServiceControllerError, MultiServiceControllerResult,
    ServiceSummary, ServiceUninstallCompletion,
};
pub use registry::{
    CONTEXT_NODE, ID_NODE, ROOT_PATH_NAME, RegistryUninstallCallback, ServiceRegistry,
    ServiceRegistryError, ServiceRegistryResult,
};

//! Application services for service registration and discovery.

mod registry;

pub use registry::{
    RegisterServiceRequest, ServiceRegistryService, ServiceRegistryServiceError,
    ServiceRegistryServiceResult,
};

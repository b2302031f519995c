//! Domain model for service registration and liveness.
//!
//! Descriptors record where a component lives, what it claims to do, and
//! what the health monitor last observed about it. All infrastructure
//! concerns are kept outside the domain boundary.

mod capabilities;
mod descriptor;
mod endpoint;
mod error;
mod health_update;
mod ids;
mod status;

pub use capabilities::ServiceCapabilities;
pub use descriptor::{RegistrationOutcome, ServiceDescriptor, ServiceRegistration, StatusChange};
pub use endpoint::ServiceEndpoint;
pub use error::{ParseServiceStatusError, RegistryDomainError};
pub use health_update::HealthUpdate;
pub use ids::ServiceId;
pub use status::ServiceStatus;

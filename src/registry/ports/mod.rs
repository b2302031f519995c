//! Port contracts for service registration and discovery.
//!
//! Ports define infrastructure-agnostic interfaces used by registry
//! services.

pub mod repository;

pub use repository::{ServiceRegistryError, ServiceRegistryRepository, ServiceRegistryResult};

//! Repository port for the synchronised descriptor store.

use crate::registry::domain::{
    HealthUpdate, RegistrationOutcome, ServiceDescriptor, ServiceId, ServiceRegistration,
    StatusChange,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for registry repository operations.
pub type ServiceRegistryResult<T> = Result<T, ServiceRegistryError>;

/// Concurrency-safe descriptor store.
///
/// Every method is atomic with respect to the others: no caller observes
/// a partially written descriptor, and read-modify-write sequences happen
/// inside the implementation rather than across calls.
#[async_trait]
pub trait ServiceRegistryRepository: Send + Sync {
    /// Inserts a descriptor or updates the existing one with the same id.
    async fn upsert(
        &self,
        registration: ServiceRegistration,
        at: DateTime<Utc>,
    ) -> ServiceRegistryResult<RegistrationOutcome>;

    /// Removes a descriptor, returning it if it existed.
    async fn remove(&self, id: &ServiceId) -> ServiceRegistryResult<Option<ServiceDescriptor>>;

    /// Finds a descriptor by id.
    async fn find_by_id(&self, id: &ServiceId) -> ServiceRegistryResult<Option<ServiceDescriptor>>;

    /// Returns every descriptor claiming the capability.
    async fn list_by_capability(
        &self,
        capability: &str,
    ) -> ServiceRegistryResult<Vec<ServiceDescriptor>>;

    /// Returns every descriptor.
    async fn list_all(&self) -> ServiceRegistryResult<Vec<ServiceDescriptor>>;

    /// Applies a liveness observation to one descriptor.
    ///
    /// Returns `None` when the descriptor was deregistered in the meantime.
    async fn apply_health(
        &self,
        id: &ServiceId,
        update: HealthUpdate,
    ) -> ServiceRegistryResult<Option<StatusChange>>;
}

/// Errors returned by registry repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ServiceRegistryError {
    /// Storage-layer failure, such as a poisoned lock.
    #[error("registry storage error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ServiceRegistryError {
    /// Wraps a storage-layer failure.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

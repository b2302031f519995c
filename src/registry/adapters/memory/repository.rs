//! Lock-guarded in-memory registry repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::{
    domain::{
        HealthUpdate, RegistrationOutcome, ServiceDescriptor, ServiceId, ServiceRegistration,
        StatusChange,
    },
    ports::{ServiceRegistryError, ServiceRegistryRepository, ServiceRegistryResult},
};

/// Thread-safe in-memory service registry.
///
/// Descriptors are keyed by id, so re-registration can only ever update
/// in place. Registry state is rebuilt from re-registration after restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceRegistry {
    services: Arc<RwLock<HashMap<ServiceId, ServiceDescriptor>>>,
}

impl InMemoryServiceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ServiceRegistryResult<RwLockReadGuard<'_, HashMap<ServiceId, ServiceDescriptor>>> {
        self.services.read().map_err(|err| {
            ServiceRegistryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(
        &self,
    ) -> ServiceRegistryResult<RwLockWriteGuard<'_, HashMap<ServiceId, ServiceDescriptor>>> {
        self.services.write().map_err(|err| {
            ServiceRegistryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl ServiceRegistryRepository for InMemoryServiceRegistry {
    async fn upsert(
        &self,
        registration: ServiceRegistration,
        at: DateTime<Utc>,
    ) -> ServiceRegistryResult<RegistrationOutcome> {
        let mut services = self.write()?;
        if let Some(existing) = services.get_mut(&registration.id) {
            existing.refresh(registration, at);
            return Ok(RegistrationOutcome::Updated(existing.clone()));
        }

        let descriptor = ServiceDescriptor::new(registration, at);
        services.insert(descriptor.id().clone(), descriptor.clone());
        Ok(RegistrationOutcome::Created(descriptor))
    }

    async fn remove(&self, id: &ServiceId) -> ServiceRegistryResult<Option<ServiceDescriptor>> {
        Ok(self.write()?.remove(id))
    }

    async fn find_by_id(&self, id: &ServiceId) -> ServiceRegistryResult<Option<ServiceDescriptor>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn list_by_capability(
        &self,
        capability: &str,
    ) -> ServiceRegistryResult<Vec<ServiceDescriptor>> {
        let matching = self
            .read()?
            .values()
            .filter(|descriptor| descriptor.capabilities().contains(capability))
            .cloned()
            .collect();
        Ok(matching)
    }

    async fn list_all(&self) -> ServiceRegistryResult<Vec<ServiceDescriptor>> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn apply_health(
        &self,
        id: &ServiceId,
        update: HealthUpdate,
    ) -> ServiceRegistryResult<Option<StatusChange>> {
        Ok(self
            .write()?
            .get_mut(id)
            .map(|descriptor| descriptor.apply(update)))
    }
}

//! Service layer for component registration and discovery.
//!
//! Provides [`ServiceRegistryService`], the synchronised API through which
//! every registry mutation flows: registration, deregistration, heartbeat,
//! and the health monitor's status updates.

use crate::registry::{
    domain::{
        HealthUpdate, RegistrationOutcome, RegistryDomainError, ServiceCapabilities,
        ServiceDescriptor, ServiceEndpoint, ServiceId, ServiceRegistration, StatusChange,
    },
    ports::{ServiceRegistryError, ServiceRegistryRepository},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Request payload for registering a component.
///
/// This is the wire shape `{id, endpoint, capabilities[]}` accepted at the
/// registration boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterServiceRequest {
    /// Component id.
    pub id: String,
    /// Component base URL.
    pub endpoint: String,
    /// Claimed capability labels.
    #[serde(default)]
    pub capabilities: Vec<String>,
}

impl RegisterServiceRequest {
    /// Creates a request with no capabilities.
    #[must_use]
    pub fn new(id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            endpoint: endpoint.into(),
            capabilities: Vec::new(),
        }
    }

    /// Sets the claimed capabilities.
    #[must_use]
    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    fn into_registration(self) -> Result<ServiceRegistration, RegistryDomainError> {
        Ok(ServiceRegistration::new(
            ServiceId::new(self.id)?,
            ServiceEndpoint::new(self.endpoint)?,
            ServiceCapabilities::new(self.capabilities)?,
        ))
    }
}

/// Service-level errors for registry operations.
#[derive(Debug, Error)]
pub enum ServiceRegistryServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] RegistryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ServiceRegistryError),
    /// No descriptor exists with the given id.
    #[error("service {0} not found")]
    NotFound(ServiceId),
}

/// Result type for registry service operations.
pub type ServiceRegistryServiceResult<T> = Result<T, ServiceRegistryServiceError>;

/// Registration and discovery service.
pub struct ServiceRegistryService<R, C>
where
    R: ServiceRegistryRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for ServiceRegistryService<R, C>
where
    R: ServiceRegistryRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> ServiceRegistryService<R, C>
where
    R: ServiceRegistryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the clock used to timestamp registry mutations.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Registers a component, or updates it in place if the id exists.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryServiceError::Domain`] when the id,
    /// endpoint, or a capability is malformed, or
    /// [`ServiceRegistryServiceError::Repository`] when storage fails.
    #[instrument(skip(self, request), fields(service_id = %request.id))]
    pub async fn register(
        &self,
        request: RegisterServiceRequest,
    ) -> ServiceRegistryServiceResult<ServiceDescriptor> {
        let registration = request.into_registration()?;
        let outcome = self.repository.upsert(registration, self.clock.utc()).await?;
        match &outcome {
            RegistrationOutcome::Created(descriptor) => info!(
                endpoint = %descriptor.endpoint(),
                capabilities = descriptor.capabilities().len(),
                "service registered"
            ),
            RegistrationOutcome::Updated(descriptor) => info!(
                endpoint = %descriptor.endpoint(),
                status = %descriptor.status(),
                "service re-registered"
            ),
        }
        Ok(outcome.into_descriptor())
    }

    /// Removes a component from the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryServiceError::NotFound`] when no descriptor
    /// has the given id.
    #[instrument(skip(self))]
    pub async fn deregister(&self, id: &str) -> ServiceRegistryServiceResult<ServiceDescriptor> {
        let service_id = ServiceId::new(id)?;
        let removed = self
            .repository
            .remove(&service_id)
            .await?
            .ok_or(ServiceRegistryServiceError::NotFound(service_id))?;
        info!("service deregistered");
        Ok(removed)
    }

    /// Returns the descriptor registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryServiceError::NotFound`] when no descriptor
    /// has the given id.
    pub async fn lookup(&self, id: &str) -> ServiceRegistryServiceResult<ServiceDescriptor> {
        let service_id = ServiceId::new(id)?;
        self.lookup_id(&service_id).await
    }

    /// Returns the descriptor registered under a validated id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryServiceError::NotFound`] when no descriptor
    /// has the given id.
    pub async fn lookup_id(
        &self,
        id: &ServiceId,
    ) -> ServiceRegistryServiceResult<ServiceDescriptor> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceRegistryServiceError::NotFound(id.clone()))
    }

    /// Returns every descriptor claiming `capability`, in no defined order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryServiceError::Repository`] when storage
    /// fails.
    pub async fn list_by_capability(
        &self,
        capability: &str,
    ) -> ServiceRegistryServiceResult<Vec<ServiceDescriptor>> {
        Ok(self.repository.list_by_capability(capability).await?)
    }

    /// Returns every descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryServiceError::Repository`] when storage
    /// fails.
    pub async fn list_all(&self) -> ServiceRegistryServiceResult<Vec<ServiceDescriptor>> {
        Ok(self.repository.list_all().await?)
    }

    /// Records an explicit heartbeat from a component.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryServiceError::NotFound`] when no descriptor
    /// has the given id.
    pub async fn heartbeat(&self, id: &str) -> ServiceRegistryServiceResult<ServiceDescriptor> {
        let service_id = ServiceId::new(id)?;
        let update = HealthUpdate::Heartbeat {
            at: self.clock.utc(),
        };
        let change = self
            .apply_health(&service_id, update)
            .await?
            .ok_or(ServiceRegistryServiceError::NotFound(service_id))?;
        Ok(change.descriptor)
    }

    /// Applies a liveness observation produced by the health monitor.
    ///
    /// Returns `Ok(None)` when the descriptor no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceRegistryServiceError::Repository`] when storage
    /// fails.
    pub async fn apply_health(
        &self,
        id: &ServiceId,
        update: HealthUpdate,
    ) -> ServiceRegistryServiceResult<Option<StatusChange>> {
        let change = self.repository.apply_health(id, update).await?;
        if let Some(applied) = change.as_ref().filter(|applied| applied.changed()) {
            debug!(
                service_id = %id,
                from = %applied.previous,
                to = %applied.descriptor.status(),
                "service status changed"
            );
        }
        Ok(change)
    }
}

//! Service descriptor aggregate root.

use super::{HealthUpdate, ServiceCapabilities, ServiceEndpoint, ServiceId, ServiceStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated registration input for one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRegistration {
    /// Component id.
    pub id: ServiceId,
    /// Component base URL.
    pub endpoint: ServiceEndpoint,
    /// Claimed capabilities.
    pub capabilities: ServiceCapabilities,
}

impl ServiceRegistration {
    /// Creates registration input from validated parts.
    #[must_use]
    pub const fn new(
        id: ServiceId,
        endpoint: ServiceEndpoint,
        capabilities: ServiceCapabilities,
    ) -> Self {
        Self {
            id,
            endpoint,
            capabilities,
        }
    }
}

/// Registry record identifying one external capability provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    id: ServiceId,
    endpoint: ServiceEndpoint,
    capabilities: ServiceCapabilities,
    status: ServiceStatus,
    status_message: Option<String>,
    registered_at: DateTime<Utc>,
    last_heartbeat: DateTime<Utc>,
    last_checked_at: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl ServiceDescriptor {
    /// Creates a descriptor with `Unknown` status.
    ///
    /// Registration counts as the first heartbeat so stale detection has a
    /// reference point before any probe runs.
    #[must_use]
    pub fn new(registration: ServiceRegistration, at: DateTime<Utc>) -> Self {
        Self {
            id: registration.id,
            endpoint: registration.endpoint,
            capabilities: registration.capabilities,
            status: ServiceStatus::Unknown,
            status_message: None,
            registered_at: at,
            last_heartbeat: at,
            last_checked_at: None,
            updated_at: at,
        }
    }

    /// Returns the component id.
    #[must_use]
    pub const fn id(&self) -> &ServiceId {
        &self.id
    }

    /// Returns the component endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Returns the claimed capabilities.
    #[must_use]
    pub const fn capabilities(&self) -> &ServiceCapabilities {
        &self.capabilities
    }

    /// Returns the liveness status.
    #[must_use]
    pub const fn status(&self) -> ServiceStatus {
        self.status
    }

    /// Returns the diagnostic message from the last failed observation.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Returns the first registration timestamp.
    #[must_use]
    pub const fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Returns the latest liveness timestamp.
    #[must_use]
    pub const fn last_heartbeat(&self) -> DateTime<Utc> {
        self.last_heartbeat
    }

    /// Returns when the last probe completed, if any.
    #[must_use]
    pub const fn last_checked_at(&self) -> Option<DateTime<Utc>> {
        self.last_checked_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a re-registration in place.
    ///
    /// Endpoint and capabilities are replaced and the heartbeat refreshed.
    /// `registered_at` is preserved. Re-registration counts as a heartbeat,
    /// so an `Unreachable` component comes back as `Healthy`; any other
    /// status is kept until the next probe.
    pub fn refresh(&mut self, registration: ServiceRegistration, at: DateTime<Utc>) {
        self.endpoint = registration.endpoint;
        self.capabilities = registration.capabilities;
        self.last_heartbeat = at;
        self.updated_at = at;
        if self.status == ServiceStatus::Unreachable {
            self.set_status(ServiceStatus::Healthy, None, at);
        }
    }

    /// Applies a liveness observation and reports the resulting change.
    pub fn apply(&mut self, update: HealthUpdate) -> StatusChange {
        let previous = self.status;
        match update {
            HealthUpdate::ProbeSucceeded { at } => {
                self.last_heartbeat = at;
                self.last_checked_at = Some(at);
                self.set_status(ServiceStatus::Healthy, None, at);
            }
            HealthUpdate::ProbeFailed { at, message } => {
                self.last_checked_at = Some(at);
                self.set_status(ServiceStatus::Unhealthy, Some(message), at);
            }
            HealthUpdate::ProbeUnreachable { at, message } => {
                self.last_checked_at = Some(at);
                self.set_status(ServiceStatus::Unreachable, Some(message), at);
            }
            HealthUpdate::Heartbeat { at } => {
                self.last_heartbeat = at;
                self.updated_at = at;
                if matches!(
                    self.status,
                    ServiceStatus::Unknown | ServiceStatus::Unreachable
                ) {
                    self.set_status(ServiceStatus::Healthy, None, at);
                }
            }
            HealthUpdate::StaleSince { cutoff, at } => {
                if self.last_heartbeat < cutoff && self.status != ServiceStatus::Unreachable {
                    let message = format!("no heartbeat since {}", self.last_heartbeat);
                    self.set_status(ServiceStatus::Unreachable, Some(message), at);
                }
            }
        }
        StatusChange {
            previous,
            descriptor: self.clone(),
        }
    }

    fn set_status(&mut self, next: ServiceStatus, message: Option<String>, at: DateTime<Utc>) {
        if self.status.can_transition_to(next) {
            self.status = next;
            self.status_message = message;
            self.updated_at = at;
        }
    }
}

/// Result of applying a [`HealthUpdate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    /// Status before the update.
    pub previous: ServiceStatus,
    /// Descriptor after the update.
    pub descriptor: ServiceDescriptor,
}

impl StatusChange {
    /// Returns whether the update changed the status.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous != self.descriptor.status()
    }
}

/// Outcome of an idempotent registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A new descriptor was inserted.
    Created(ServiceDescriptor),
    /// An existing descriptor was updated in place.
    Updated(ServiceDescriptor),
}

impl RegistrationOutcome {
    /// Returns the stored descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &ServiceDescriptor {
        match self {
            Self::Created(descriptor) | Self::Updated(descriptor) => descriptor,
        }
    }

    /// Consumes the outcome and returns the stored descriptor.
    #[must_use]
    pub fn into_descriptor(self) -> ServiceDescriptor {
        match self {
            Self::Created(descriptor) | Self::Updated(descriptor) => descriptor,
        }
    }
}

//! Registry-backed request router.

use crate::failure::FailureKind;
use crate::registry::{
    domain::{ServiceDescriptor, ServiceStatus},
    ports::ServiceRegistryRepository,
    services::{ServiceRegistryService, ServiceRegistryServiceError},
};
use crate::routing::{
    domain::{RouteRequest, RouteResult},
    ports::{ForwardError, ForwardTransport, RequestForwarder},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Stateless per-request router.
///
/// Any number of routes may run concurrently; the registry is the only
/// shared state and is read through its synchronised service API.
pub struct RequestRouter<R, T, C>
where
    R: ServiceRegistryRepository,
    T: ForwardTransport,
    C: Clock + Send + Sync,
{
    registry: ServiceRegistryService<R, C>,
    transport: Arc<T>,
}

impl<R, T, C> Clone for RequestRouter<R, T, C>
where
    R: ServiceRegistryRepository,
    T: ForwardTransport,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<R, T, C> RequestRouter<R, T, C>
where
    R: ServiceRegistryRepository,
    T: ForwardTransport,
    C: Clock + Send + Sync,
{
    /// Creates a router resolving targets through `registry`.
    #[must_use]
    pub const fn new(registry: ServiceRegistryService<R, C>, transport: Arc<T>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// Resolves the request's target and forwards it within its deadline.
    ///
    /// Unregistered targets yield `unknown_target` and targets already
    /// known to be unreachable yield `unreachable`, both without any
    /// network I/O. A deadline that has already passed yields `timeout`
    /// before forwarding.
    #[instrument(
        skip(self, request),
        fields(
            request_id = %request.request_id(),
            target = request.target_id(),
            action = request.action()
        )
    )]
    pub async fn route(&self, request: RouteRequest) -> RouteResult {
        let descriptor = match self.resolve(request.target_id()).await {
            Ok(descriptor) => descriptor,
            Err(failure) => return failure,
        };

        if !descriptor.status().is_routable() {
            debug!("target unreachable, failing fast");
            return RouteResult::failure(
                FailureKind::Unreachable,
                format!("service '{}' is unreachable", descriptor.id()),
            );
        }

        if request.is_expired() {
            return RouteResult::failure(
                FailureKind::Timeout,
                "deadline elapsed before forwarding",
            );
        }

        let forwarded = tokio::time::timeout_at(
            request.deadline(),
            self.transport
                .forward(&descriptor, request.action(), request.parameters()),
        )
        .await;

        let result = match forwarded {
            Ok(Ok(payload)) => RouteResult::success(descriptor.id().as_str(), payload),
            Ok(Err(ForwardError::Target(message))) => {
                RouteResult::failure(FailureKind::TargetError, message)
            }
            Ok(Err(ForwardError::Transport(message))) => {
                RouteResult::failure(FailureKind::TransportError, message)
            }
            Ok(Err(ForwardError::Timeout(message))) => {
                RouteResult::failure(FailureKind::Timeout, message)
            }
            Err(_) => RouteResult::failure(FailureKind::Timeout, "deadline elapsed while forwarding"),
        };

        if let Some(kind) = result.error_kind() {
            debug!(error_kind = %kind, message = result.message(), "route failed");
        }
        result
    }

    async fn resolve(&self, target_id: &str) -> Result<ServiceDescriptor, RouteResult> {
        match self.registry.lookup(target_id).await {
            Ok(descriptor) => Ok(descriptor),
            Err(ServiceRegistryServiceError::NotFound(_) | ServiceRegistryServiceError::Domain(_)) => {
                Err(RouteResult::failure(
                    FailureKind::UnknownTarget,
                    format!("no service registered as '{target_id}'"),
                ))
            }
            Err(err @ ServiceRegistryServiceError::Repository(_)) => {
                warn!(error = %err, "registry lookup failed");
                Err(RouteResult::failure(FailureKind::TransportError, err.to_string()))
            }
        }
    }
}

#[async_trait]
impl<R, T, C> RequestForwarder for RequestRouter<R, T, C>
where
    R: ServiceRegistryRepository,
    T: ForwardTransport,
    C: Clock + Send + Sync,
{
    async fn route(&self, request: RouteRequest) -> RouteResult {
        Self::route(self, request).await
    }

    async fn target_status(&self, target_id: &str) -> Option<ServiceStatus> {
        self.registry
            .lookup(target_id)
            .await
            .ok()
            .map(|descriptor| descriptor.status())
    }

    async fn targets_for_capability(&self, capability: &str) -> Vec<ServiceDescriptor> {
        self.registry
            .list_by_capability(capability)
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, capability, "capability lookup failed");
                Vec::new()
            })
    }
}

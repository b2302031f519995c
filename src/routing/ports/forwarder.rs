//! Routing seam consumed by the cascade and AI-assist adapters.

use crate::registry::domain::{ServiceDescriptor, ServiceStatus};
use crate::routing::domain::{RouteRequest, RouteResult};
use async_trait::async_trait;

/// Routes requests and answers directory questions about targets.
///
/// Components never call each other directly; every forwarded call goes
/// through an implementation of this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestForwarder: Send + Sync {
    /// Routes one request and classifies its outcome.
    async fn route(&self, request: RouteRequest) -> RouteResult;

    /// Returns the current status of `target_id`, if it is registered.
    async fn target_status(&self, target_id: &str) -> Option<ServiceStatus>;

    /// Returns the targets claiming `capability`, in no defined order.
    async fn targets_for_capability(&self, capability: &str) -> Vec<ServiceDescriptor>;
}

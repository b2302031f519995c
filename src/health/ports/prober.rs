//! Prober port used by the health monitor.

use crate::health::domain::ProbeOutcome;
use crate::registry::domain::ServiceDescriptor;
use async_trait::async_trait;

/// Issues one liveness probe against a component.
///
/// Implementations classify every failure into a [`ProbeOutcome`] rather
/// than returning errors. The monitor bounds each call with the policy's
/// probe timeout, so implementations need not enforce one themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthProber: Send + Sync {
    /// Probes the component described by `descriptor`.
    async fn probe(&self, descriptor: &ServiceDescriptor) -> ProbeOutcome;
}

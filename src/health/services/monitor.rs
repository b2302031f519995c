//! Scheduled probe cycles and stale-heartbeat detection.

use crate::health::{
    domain::{HealthPolicy, ProbeCycleReport, ProbeOutcome},
    ports::HealthProber,
};
use crate::registry::{
    domain::{HealthUpdate, ServiceDescriptor, ServiceStatus},
    ports::ServiceRegistryRepository,
    services::{ServiceRegistryService, ServiceRegistryServiceError},
};
use futures::future;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Semaphore, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

/// Errors returned by a probe cycle.
#[derive(Debug, Error)]
pub enum HealthMonitorError {
    /// Reading or updating the registry failed.
    #[error(transparent)]
    Registry(#[from] ServiceRegistryServiceError),
}

/// Result type for health monitor operations.
pub type HealthMonitorResult<T> = Result<T, HealthMonitorError>;

/// Periodically probes every registered component.
pub struct HealthMonitor<R, P, C>
where
    R: ServiceRegistryRepository,
    P: HealthProber,
    C: Clock + Send + Sync,
{
    registry: ServiceRegistryService<R, C>,
    prober: Arc<P>,
    policy: HealthPolicy,
}

impl<R, P, C> HealthMonitor<R, P, C>
where
    R: ServiceRegistryRepository,
    P: HealthProber,
    C: Clock + Send + Sync,
{
    /// Creates a monitor writing through `registry`.
    #[must_use]
    pub const fn new(
        registry: ServiceRegistryService<R, C>,
        prober: Arc<P>,
        policy: HealthPolicy,
    ) -> Self {
        Self {
            registry,
            prober,
            policy,
        }
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> &HealthPolicy {
        &self.policy
    }

    /// Runs one probe cycle followed by a stale-heartbeat sweep.
    ///
    /// At most `max_concurrent_probes` probes are in flight at once. Each
    /// probe is bounded by the policy's probe timeout; a timeout counts as
    /// unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`HealthMonitorError::Registry`] when the registry cannot be
    /// read or updated.
    #[instrument(skip(self))]
    pub async fn run_cycle(&self) -> HealthMonitorResult<ProbeCycleReport> {
        let descriptors = self.registry.list_all().await?;
        let permits = Semaphore::new(self.policy.max_concurrent_probes());
        let recorded = future::join_all(
            descriptors
                .into_iter()
                .map(|descriptor| self.probe_and_record(&permits, descriptor)),
        )
        .await;

        let mut report = ProbeCycleReport::default();
        for result in recorded {
            if let Some(status) = result? {
                report.record_probe(status);
            }
        }
        report.stale = self.sweep_stale().await?;

        debug!(
            probed = report.probed,
            healthy = report.healthy,
            unhealthy = report.unhealthy,
            unreachable = report.unreachable,
            stale = report.stale,
            "probe cycle complete"
        );
        Ok(report)
    }

    /// Forces descriptors whose heartbeat is older than the stale threshold
    /// to `unreachable`, returning how many changed.
    ///
    /// # Errors
    ///
    /// Returns [`HealthMonitorError::Registry`] when the registry cannot be
    /// read or updated.
    pub async fn sweep_stale(&self) -> HealthMonitorResult<usize> {
        let now = self.registry.clock().utc();
        let cutoff = now - self.policy.stale_after();
        let mut marked = 0;

        for descriptor in self.registry.list_all().await? {
            if descriptor.last_heartbeat() >= cutoff
                || descriptor.status() == ServiceStatus::Unreachable
            {
                continue;
            }
            let update = HealthUpdate::StaleSince { cutoff, at: now };
            if let Some(change) = self.registry.apply_health(descriptor.id(), update).await?
                && change.changed()
            {
                warn!(
                    service_id = %descriptor.id(),
                    last_heartbeat = %descriptor.last_heartbeat(),
                    "heartbeat stale, marking unreachable"
                );
                marked += 1;
            }
        }
        Ok(marked)
    }

    async fn probe_and_record(
        &self,
        permits: &Semaphore,
        descriptor: ServiceDescriptor,
    ) -> HealthMonitorResult<Option<ServiceStatus>> {
        let Ok(_permit) = permits.acquire().await else {
            return Ok(None);
        };
        let outcome = tokio::time::timeout(
            self.policy.probe_timeout(),
            self.prober.probe(&descriptor),
        )
        .await
        .unwrap_or_else(|_| {
            ProbeOutcome::unreachable(format!(
                "probe timed out after {:?}",
                self.policy.probe_timeout()
            ))
        });

        let update = outcome.into_update(self.registry.clock().utc());
        let change = self.registry.apply_health(descriptor.id(), update).await?;
        Ok(change.map(|applied| applied.descriptor.status()))
    }
}

impl<R, P, C> HealthMonitor<R, P, C>
where
    R: ServiceRegistryRepository + 'static,
    P: HealthProber + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Spawns the background probe loop.
    ///
    /// The first cycle runs immediately, then once per probe interval. A
    /// slow cycle delays the next tick rather than stacking cycles. The
    /// loop exits when `shutdown` becomes `true` or its sender is dropped.
    pub fn spawn(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.policy.probe_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(
                interval = ?self.policy.probe_interval(),
                max_concurrent_probes = self.policy.max_concurrent_probes(),
                "health monitor started"
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(err) = self.run_cycle().await {
                            warn!(error = %err, "probe cycle failed");
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }
            info!("health monitor stopped");
        })
    }
}

//! Ordered, deadline-aware cascade resolution.

use crate::cascade::domain::{CascadeCandidate, CascadeConfig, CascadeRequest, CascadeResponse};
use crate::creation::services::CreationEngine;
use crate::failure::FailureKind;
use crate::registry::domain::{ServiceDescriptor, ServiceStatus};
use crate::routing::{domain::RouteResult, ports::RequestForwarder};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Resolves intents by walking a cascade chain through the router.
pub struct CascadeController<F, C>
where
    F: RequestForwarder,
    C: Clock + Send + Sync,
{
    forwarder: Arc<F>,
    engine: Arc<CreationEngine<C>>,
    config: Arc<CascadeConfig>,
}

impl<F, C> Clone for CascadeController<F, C>
where
    F: RequestForwarder,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            forwarder: Arc::clone(&self.forwarder),
            engine: Arc::clone(&self.engine),
            config: Arc::clone(&self.config),
        }
    }
}

impl<F, C> CascadeController<F, C>
where
    F: RequestForwarder,
    C: Clock + Send + Sync,
{
    /// Creates a controller.
    #[must_use]
    pub const fn new(
        forwarder: Arc<F>,
        engine: Arc<CreationEngine<C>>,
        config: Arc<CascadeConfig>,
    ) -> Self {
        Self {
            forwarder,
            engine,
            config,
        }
    }

    /// Returns the chain table.
    #[must_use]
    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    /// Resolves `request` for `category`.
    ///
    /// Candidates are attempted strictly in chain order and each target
    /// at most once. The first success is returned. The deadline is
    /// checked before every candidate; once it has passed the cascade
    /// stops with `timeout` rather than reaching the creation engine.
    #[instrument(skip(self, request), fields(request_id = %request.request_id()))]
    pub async fn resolve(&self, category: &str, request: &CascadeRequest) -> CascadeResponse {
        let chain = self.config.chain_for(category);
        let mut attempted = HashSet::new();
        let mut attempts = 0_usize;

        for candidate in chain.candidates() {
            if request.is_expired() {
                info!(attempts, "deadline elapsed mid-chain");
                return CascadeResponse::Routed(RouteResult::failure(
                    FailureKind::Timeout,
                    format!("deadline elapsed after {attempts} cascade attempts"),
                ));
            }

            let targets = match candidate {
                CascadeCandidate::CreationEngine => {
                    let created = self
                        .engine
                        .create(&request.to_creation(category), request.deadline())
                        .await;
                    debug!(attempts, success = created.is_success(), "creation engine answered");
                    return CascadeResponse::Created(created);
                }
                CascadeCandidate::Service(id) => {
                    let status = if self.config.skip_unreachable() {
                        self.forwarder.target_status(id.as_str()).await
                    } else {
                        None
                    };
                    vec![(id.as_str().to_owned(), status)]
                }
                CascadeCandidate::Capability(capability) => {
                    self.capability_targets(capability).await
                }
            };

            for (target_id, status) in targets {
                if request.is_expired() {
                    break;
                }
                if !attempted.insert(target_id.clone()) {
                    continue;
                }
                if self.config.skip_unreachable() && status == Some(ServiceStatus::Unreachable) {
                    debug!(target = %target_id, "skipping unreachable candidate");
                    continue;
                }

                attempts += 1;
                let result = self.forwarder.route(request.route_to(&target_id)).await;
                if result.is_success() {
                    info!(target = %target_id, attempts, "candidate served request");
                    return CascadeResponse::Routed(result);
                }
                debug!(
                    target = %target_id,
                    error_kind = ?result.error_kind(),
                    message = result.message(),
                    "candidate failed, advancing"
                );
            }
        }

        CascadeResponse::Routed(RouteResult::failure(
            FailureKind::UnknownTarget,
            format!("cascade chain '{}' has no terminal stage", chain.category()),
        ))
    }

    /// Expands a capability into targets sorted healthy-first, then by id.
    async fn capability_targets(&self, capability: &str) -> Vec<(String, Option<ServiceStatus>)> {
        let mut descriptors = self.forwarder.targets_for_capability(capability).await;
        descriptors.sort_by(|left, right| {
            health_rank(left)
                .cmp(&health_rank(right))
                .then_with(|| left.id().cmp(right.id()))
        });
        descriptors
            .into_iter()
            .map(|descriptor| (descriptor.id().as_str().to_owned(), Some(descriptor.status())))
            .collect()
    }
}

const fn health_rank(descriptor: &ServiceDescriptor) -> u8 {
    match descriptor.status() {
        ServiceStatus::Healthy => 0,
        ServiceStatus::Unknown => 1,
        ServiceStatus::Unhealthy => 2,
        ServiceStatus::Unreachable => 3,
    }
}

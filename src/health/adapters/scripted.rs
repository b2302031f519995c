//! In-memory prober with scripted outcomes.

use crate::health::{domain::ProbeOutcome, ports::HealthProber};
use crate::registry::domain::{ServiceDescriptor, ServiceId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Prober whose answers are configured per service id.
///
/// Unscripted services answer healthy. A scripted delay makes the probe
/// sleep before answering, which lets tests exercise the monitor's probe
/// timeout without a network.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHealthProber {
    state: Arc<RwLock<ScriptedState>>,
}

#[derive(Debug, Default)]
struct ScriptedState {
    outcomes: HashMap<ServiceId, ProbeOutcome>,
    delays: HashMap<ServiceId, Duration>,
    probe_counts: HashMap<ServiceId, usize>,
}

impl ScriptedHealthProber {
    /// Creates a prober that answers healthy for every service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the outcome returned for `id`.
    pub fn set_outcome(&self, id: ServiceId, outcome: ProbeOutcome) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .outcomes
            .insert(id, outcome);
    }

    /// Delays probes of `id` by `delay` before answering.
    pub fn set_delay(&self, id: ServiceId, delay: Duration) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .delays
            .insert(id, delay);
    }

    /// Returns how many probes `id` has received.
    #[must_use]
    pub fn probe_count(&self, id: &ServiceId) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .probe_counts
            .get(id)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl HealthProber for ScriptedHealthProber {
    async fn probe(&self, descriptor: &ServiceDescriptor) -> ProbeOutcome {
        let (outcome, delay) = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            *state.probe_counts.entry(descriptor.id().clone()).or_default() += 1;
            (
                state
                    .outcomes
                    .get(descriptor.id())
                    .cloned()
                    .unwrap_or(ProbeOutcome::Healthy),
                state.delays.get(descriptor.id()).copied(),
            )
        };

        if let Some(pause) = delay {
            tokio::time::sleep(pause).await;
        }
        outcome
    }
}

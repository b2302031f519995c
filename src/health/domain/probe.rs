//! Probe outcomes and per-cycle reporting.

use crate::registry::domain::{HealthUpdate, ServiceStatus};
use chrono::{DateTime, Utc};

/// Classified result of probing one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The component answered its probe successfully.
    Healthy,
    /// The component answered with an error response.
    Unhealthy {
        /// Diagnostic detail, such as the response status.
        message: String,
    },
    /// The probe timed out or could not connect.
    Unreachable {
        /// Diagnostic detail.
        message: String,
    },
}

impl ProbeOutcome {
    /// Creates an [`ProbeOutcome::Unhealthy`] outcome.
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self::Unhealthy {
            message: message.into(),
        }
    }

    /// Creates an [`ProbeOutcome::Unreachable`] outcome.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Converts the outcome into the registry update recorded at `at`.
    #[must_use]
    pub fn into_update(self, at: DateTime<Utc>) -> HealthUpdate {
        match self {
            Self::Healthy => HealthUpdate::ProbeSucceeded { at },
            Self::Unhealthy { message } => HealthUpdate::ProbeFailed { at, message },
            Self::Unreachable { message } => HealthUpdate::ProbeUnreachable { at, message },
        }
    }
}

/// Counts of what one probe cycle observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeCycleReport {
    /// Descriptors probed.
    pub probed: usize,
    /// Probes that succeeded.
    pub healthy: usize,
    /// Probes that reached the component but failed.
    pub unhealthy: usize,
    /// Probes that timed out or could not connect.
    pub unreachable: usize,
    /// Descriptors forced to `unreachable` by stale-heartbeat detection.
    pub stale: usize,
}

impl ProbeCycleReport {
    pub(crate) const fn record_probe(&mut self, status: ServiceStatus) {
        self.probed += 1;
        match status {
            ServiceStatus::Healthy => self.healthy += 1,
            ServiceStatus::Unhealthy => self.unhealthy += 1,
            ServiceStatus::Unreachable => self.unreachable += 1,
            ServiceStatus::Unknown => {}
        }
    }
}

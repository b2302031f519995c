//! Probe scheduling policy.

use std::time::Duration;
use thiserror::Error;

/// Errors returned while constructing a [`HealthPolicy`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HealthPolicyError {
    /// The probe interval is zero.
    #[error("probe interval must be greater than zero")]
    ZeroInterval,
    /// The probe timeout is zero.
    #[error("probe timeout must be greater than zero")]
    ZeroTimeout,
    /// The stale multiplier is zero.
    #[error("stale multiplier must be at least 1")]
    ZeroStaleMultiplier,
    /// The probe concurrency limit is zero.
    #[error("probe concurrency must be at least 1")]
    ZeroConcurrency,
    /// The stale threshold does not fit in a timestamp delta.
    #[error("stale threshold overflows: {interval:?} x {multiplier}")]
    StaleThresholdOverflow {
        /// Configured probe interval.
        interval: Duration,
        /// Configured multiplier.
        multiplier: u32,
    },
}

/// Probe interval, timeout, stale threshold, and fan-out limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPolicy {
    probe_interval: Duration,
    probe_timeout: Duration,
    stale_multiplier: u32,
    max_concurrent_probes: usize,
    stale_after: chrono::Duration,
}

impl HealthPolicy {
    /// Creates a validated policy.
    ///
    /// A descriptor is considered stale once its last heartbeat is older
    /// than `probe_interval * stale_multiplier`.
    ///
    /// # Errors
    ///
    /// Returns [`HealthPolicyError`] when any value is zero or the stale
    /// threshold overflows.
    pub fn new(
        probe_interval: Duration,
        probe_timeout: Duration,
        stale_multiplier: u32,
        max_concurrent_probes: usize,
    ) -> Result<Self, HealthPolicyError> {
        if probe_interval.is_zero() {
            return Err(HealthPolicyError::ZeroInterval);
        }
        if probe_timeout.is_zero() {
            return Err(HealthPolicyError::ZeroTimeout);
        }
        if stale_multiplier == 0 {
            return Err(HealthPolicyError::ZeroStaleMultiplier);
        }
        if max_concurrent_probes == 0 {
            return Err(HealthPolicyError::ZeroConcurrency);
        }

        let overflow = HealthPolicyError::StaleThresholdOverflow {
            interval: probe_interval,
            multiplier: stale_multiplier,
        };
        let stale_after = probe_interval
            .checked_mul(stale_multiplier)
            .and_then(|threshold| chrono::Duration::from_std(threshold).ok())
            .ok_or(overflow)?;

        Ok(Self {
            probe_interval,
            probe_timeout,
            stale_multiplier,
            max_concurrent_probes,
            stale_after,
        })
    }

    /// Returns the time between probe cycles.
    #[must_use]
    pub const fn probe_interval(&self) -> Duration {
        self.probe_interval
    }

    /// Returns the per-probe timeout.
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Returns the number of intervals after which a heartbeat is stale.
    #[must_use]
    pub const fn stale_multiplier(&self) -> u32 {
        self.stale_multiplier
    }

    /// Returns the maximum number of probes in flight at once.
    #[must_use]
    pub const fn max_concurrent_probes(&self) -> usize {
        self.max_concurrent_probes
    }

    /// Returns the heartbeat age beyond which a descriptor is stale.
    #[must_use]
    pub const fn stale_after(&self) -> chrono::Duration {
        self.stale_after
    }
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            probe_interval: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(2),
            stale_multiplier: 3,
            max_concurrent_probes: 8,
            stale_after: chrono::Duration::seconds(30),
        }
    }
}

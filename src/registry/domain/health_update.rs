//! Liveness observations applied to descriptors.

use chrono::{DateTime, Utc};

/// A single liveness observation for one descriptor.
///
/// Updates are applied atomically under the registry lock so that a
/// conditional update such as [`HealthUpdate::StaleSince`] never races a
/// concurrent heartbeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthUpdate {
    /// A probe completed successfully.
    ProbeSucceeded {
        /// Probe completion time.
        at: DateTime<Utc>,
    },
    /// A probe reached the component but received an error response.
    ProbeFailed {
        /// Probe completion time.
        at: DateTime<Utc>,
        /// Diagnostic detail.
        message: String,
    },
    /// A probe timed out or could not connect.
    ProbeUnreachable {
        /// Probe completion time.
        at: DateTime<Utc>,
        /// Diagnostic detail.
        message: String,
    },
    /// The component sent an explicit heartbeat.
    Heartbeat {
        /// Heartbeat receipt time.
        at: DateTime<Utc>,
    },
    /// Force `Unreachable` if the last heartbeat is older than `cutoff`.
    StaleSince {
        /// Oldest acceptable heartbeat.
        cutoff: DateTime<Utc>,
        /// Evaluation time.
        at: DateTime<Utc>,
    },
}

//! Liveness status of a registered component.

use super::ParseServiceStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Liveness status maintained by the health monitor.
///
/// New registrations start as `Unknown`. After the first probe the status
/// moves freely between `Healthy`, `Unhealthy`, and `Unreachable` but never
/// returns to `Unknown`. Removal is handled by deregistration, not by a
/// status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    /// No probe or heartbeat has been observed yet.
    Unknown,
    /// The last probe succeeded.
    Healthy,
    /// The component is reachable but answered its probe with an error.
    Unhealthy,
    /// The component timed out, refused connections, or its heartbeat
    /// went stale.
    Unreachable,
}

impl ServiceStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
            Self::Unreachable => "unreachable",
        }
    }

    /// Returns whether moving from `self` to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        !matches!(next, Self::Unknown) || matches!(self, Self::Unknown)
    }

    /// Returns whether the router may attempt network I/O to this status.
    #[must_use]
    pub const fn is_routable(self) -> bool {
        !matches!(self, Self::Unreachable)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceStatus {
    type Error = ParseServiceStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "unknown" => Ok(Self::Unknown),
            "healthy" => Ok(Self::Healthy),
            "unhealthy" => Ok(Self::Unhealthy),
            "unreachable" => Ok(Self::Unreachable),
            _ => Err(ParseServiceStatusError(value.to_owned())),
        }
    }
}

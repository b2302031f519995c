//! Failure taxonomy shared by the routing, cascade, and creation slices.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classified reason a routed or created outcome did not succeed.
///
/// Request-path operations never return an opaque failure: every
/// unsuccessful outcome carries exactly one of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The target id is not registered.
    UnknownTarget,
    /// The target is known to be unreachable; no I/O was attempted.
    Unreachable,
    /// The request deadline elapsed.
    Timeout,
    /// A network-level failure occurred while forwarding.
    TransportError,
    /// The target answered with an application error.
    TargetError,
    /// The creation engine's security gate rejected the input.
    ValidationError,
}

impl FailureKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownTarget => "unknown_target",
            Self::Unreachable => "unreachable",
            Self::Timeout => "timeout",
            Self::TransportError => "transport_error",
            Self::TargetError => "target_error",
            Self::ValidationError => "validation_error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

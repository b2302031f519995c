//! Classified outcome of a routed request.

use crate::failure::FailureKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one routed request.
///
/// Exactly one of `payload` or `error_kind` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    success: bool,
    payload: Option<Value>,
    error_kind: Option<FailureKind>,
    message: Option<String>,
    served_by: Option<String>,
}

impl RouteResult {
    /// Creates a successful result answered by `served_by`.
    #[must_use]
    pub fn success(served_by: impl Into<String>, payload: Value) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error_kind: None,
            message: None,
            served_by: Some(served_by.into()),
        }
    }

    /// Creates a failed result.
    #[must_use]
    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            error_kind: Some(kind),
            message: Some(message.into()),
            served_by: None,
        }
    }

    /// Returns whether the target answered successfully.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the response payload on success.
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Consumes the result and returns the payload on success.
    #[must_use]
    pub fn into_payload(self) -> Option<Value> {
        self.payload
    }

    /// Returns the failure classification.
    #[must_use]
    pub const fn error_kind(&self) -> Option<FailureKind> {
        self.error_kind
    }

    /// Returns the failure detail, preserving the target's own message for
    /// target errors.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the id of the component that answered.
    #[must_use]
    pub fn served_by(&self) -> Option<&str> {
        self.served_by.as_deref()
    }
}

//! Per-call routing request.

use serde_json::{Map, Value};
use tokio::time::Instant;
use uuid::Uuid;

/// A request forwarded to one target component.
///
/// Requests are created per call and never persisted. The deadline is an
/// absolute instant so it propagates unchanged through every hop of a
/// cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    request_id: Uuid,
    target_id: String,
    action: String,
    parameters: Map<String, Value>,
    deadline: Instant,
}

impl RouteRequest {
    /// Creates a request with no parameters.
    #[must_use]
    pub fn new(target_id: impl Into<String>, action: impl Into<String>, deadline: Instant) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            target_id: target_id.into(),
            action: action.into(),
            parameters: Map::new(),
            deadline,
        }
    }

    /// Replaces the parameter payload.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Adds or replaces one parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Replaces the correlation id, so hops of one cascade share it.
    #[must_use]
    pub const fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Returns a copy aimed at another target, keeping id and deadline.
    #[must_use]
    pub fn retarget(&self, target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            ..self.clone()
        }
    }

    /// Returns the correlation id shared by every hop of this request.
    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Returns the target component id.
    #[must_use]
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Returns the requested action.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the opaque parameter payload.
    #[must_use]
    pub const fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// Returns the absolute deadline.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns whether the deadline has already passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

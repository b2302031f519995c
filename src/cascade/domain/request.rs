//! Cascade request and response models.

use super::CREATION_ENGINE_ID;
use crate::creation::domain::{CreationRequest, CreationResult};
use crate::failure::FailureKind;
use crate::routing::domain::{RouteRequest, RouteResult};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::time::Instant;
use uuid::Uuid;

/// Parameter keys searched, in order, for the intent text.
const INTENT_KEYS: [&str; 3] = ["intent", "prompt", "text"];

/// A request resolved through a cascade chain.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeRequest {
    request_id: Uuid,
    action: String,
    parameters: Map<String, Value>,
    deadline: Instant,
}

impl CascadeRequest {
    /// Creates a request with no parameters.
    #[must_use]
    pub fn new(action: impl Into<String>, deadline: Instant) -> Self {
        Self {
            request_id: Uuid::new_v4(),
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

    /// Returns the correlation id shared by every attempt.
    #[must_use]
    pub const fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Returns the requested action.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the parameter payload.
    #[must_use]
    pub const fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// Returns the absolute deadline.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns whether the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Builds the routed request for one candidate target.
    #[must_use]
    pub fn route_to(&self, target_id: &str) -> RouteRequest {
        RouteRequest::new(target_id, self.action.as_str(), self.deadline)
            .with_parameters(self.parameters.clone())
            .with_request_id(self.request_id)
    }

    /// Builds the creation engine's view of this request.
    ///
    /// Intent text comes from the first string among `intent`, `prompt`,
    /// and `text`, falling back to the action; `context` must be an object
    /// and `constraints` an array of strings to be carried over.
    #[must_use]
    pub fn to_creation(&self, category: &str) -> CreationRequest {
        let intent = INTENT_KEYS
            .iter()
            .find_map(|key| self.parameters.get(*key).and_then(Value::as_str))
            .unwrap_or(self.action.as_str());
        let context = self
            .parameters
            .get("context")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let constraints = self
            .parameters
            .get("constraints")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        CreationRequest::new(intent, category)
            .with_context(context)
            .with_constraints(constraints)
    }
}

/// Final outcome of a cascade resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", content = "result", rename_all = "snake_case")]
pub enum CascadeResponse {
    /// A routed candidate answered, or the cascade stopped on a deadline.
    Routed(RouteResult),
    /// The creation engine answered.
    Created(CreationResult),
}

impl CascadeResponse {
    /// Returns whether the outcome is usable.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        match self {
            Self::Routed(result) => result.is_success(),
            Self::Created(result) => result.is_success(),
        }
    }

    /// Returns the id of the component that served the request.
    #[must_use]
    pub fn served_by(&self) -> Option<&str> {
        match self {
            Self::Routed(result) => result.served_by(),
            Self::Created(result) => result.is_success().then_some(CREATION_ENGINE_ID),
        }
    }

    /// Returns the failure kind of an unsuccessful outcome.
    #[must_use]
    pub const fn error_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Routed(result) => result.error_kind(),
            Self::Created(result) => result.error_kind(),
        }
    }

    /// Returns the creation result, if the engine served.
    #[must_use]
    pub const fn as_created(&self) -> Option<&CreationResult> {
        match self {
            Self::Created(result) => Some(result),
            Self::Routed(_) => None,
        }
    }

    /// Returns the routed result, if a candidate served.
    #[must_use]
    pub const fn as_routed(&self) -> Option<&RouteResult> {
        match self {
            Self::Routed(result) => Some(result),
            Self::Created(_) => None,
        }
    }
}

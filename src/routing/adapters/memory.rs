//! In-memory forward transport with scripted responses.

use crate::registry::domain::ServiceDescriptor;
use crate::routing::ports::{ForwardError, ForwardTransport};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// A call observed by [`InMemoryTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Target id.
    pub target_id: String,
    /// Forwarded action.
    pub action: String,
    /// Forwarded parameters.
    pub parameters: Map<String, Value>,
}

/// Transport that answers from a per-target script.
///
/// Every call is recorded, which lets tests assert that a code path
/// performed no network I/O. Unscripted targets fail with a transport
/// error, as an unreachable host would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransport {
    state: Arc<RwLock<TransportState>>,
}

#[derive(Debug, Default)]
struct TransportState {
    responses: HashMap<String, Result<Value, ForwardError>>,
    delays: HashMap<String, Duration>,
    calls: Vec<RecordedCall>,
}

impl InMemoryTransport {
    /// Creates a transport with no scripted targets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the response returned by `target_id`.
    pub fn respond(&self, target_id: impl Into<String>, response: Result<Value, ForwardError>) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .responses
            .insert(target_id.into(), response);
    }

    /// Delays every answer from `target_id`.
    pub fn delay(&self, target_id: impl Into<String>, delay: Duration) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .delays
            .insert(target_id.into(), delay);
    }

    /// Returns every call observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .clone()
    }

    /// Returns how many calls reached `target_id`.
    #[must_use]
    pub fn call_count(&self, target_id: &str) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .iter()
            .filter(|call| call.target_id == target_id)
            .count()
    }
}

#[async_trait]
impl ForwardTransport for InMemoryTransport {
    async fn forward(
        &self,
        descriptor: &ServiceDescriptor,
        action: &str,
        parameters: &Map<String, Value>,
    ) -> Result<Value, ForwardError> {
        let target_id = descriptor.id().as_str();
        let (response, delay) = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.calls.push(RecordedCall {
                target_id: target_id.to_owned(),
                action: action.to_owned(),
                parameters: parameters.clone(),
            });
            (
                state.responses.get(target_id).cloned(),
                state.delays.get(target_id).copied(),
            )
        };

        if let Some(pause) = delay {
            tokio::time::sleep(pause).await;
        }
        response.unwrap_or_else(|| {
            Err(ForwardError::Transport(format!(
                "connection refused by {}",
                descriptor.endpoint()
            )))
        })
    }
}

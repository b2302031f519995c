//! AI-assist collaborator reached through the request router.

use crate::creation::{
    domain::ArtifactKind,
    ports::{AiAssist, AiAssistError},
};
use crate::failure::FailureKind;
use crate::routing::{domain::RouteRequest, ports::RequestForwarder};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::time::Instant;

/// Action name AI-assist components answer.
pub const GENERATE_ACTION: &str = "generate";

/// [`AiAssist`] backed by a registered component.
///
/// The call is a normal routed request with
/// `{"prompt": ..., "contentType": ...}` parameters; the component answers
/// `{"success": true, "content": ...}`.
pub struct RoutedAiAssist<F: RequestForwarder> {
    forwarder: Arc<F>,
    target_id: String,
}

impl<F: RequestForwarder> RoutedAiAssist<F> {
    /// Creates an assist that routes to `target_id`.
    #[must_use]
    pub fn new(forwarder: Arc<F>, target_id: impl Into<String>) -> Self {
        Self {
            forwarder,
            target_id: target_id.into(),
        }
    }

    /// Returns the component id generation is routed to.
    #[must_use]
    pub fn target_id(&self) -> &str {
        &self.target_id
    }
}

#[async_trait]
impl<F: RequestForwarder> AiAssist for RoutedAiAssist<F> {
    async fn generate(
        &self,
        prompt: &str,
        kind: ArtifactKind,
        deadline: Instant,
    ) -> Result<String, AiAssistError> {
        let request = RouteRequest::new(self.target_id.as_str(), GENERATE_ACTION, deadline)
            .with_parameter("prompt", prompt)
            .with_parameter("contentType", kind.as_str());
        let result = self.forwarder.route(request).await;

        if result.is_success() {
            return result
                .into_payload()
                .and_then(extract_content)
                .ok_or(AiAssistError::EmptyContent);
        }

        let message = result.message().unwrap_or("no message").to_owned();
        Err(match result.error_kind() {
            Some(FailureKind::Timeout) => AiAssistError::Timeout,
            Some(FailureKind::TargetError) => AiAssistError::Rejected(message),
            Some(kind) => AiAssistError::Unavailable(format!("{kind}: {message}")),
            None => AiAssistError::Unavailable(message),
        })
    }
}

fn extract_content(payload: Value) -> Option<String> {
    let content = match payload {
        Value::String(text) => text,
        Value::Object(mut fields) => match fields.remove("content") {
            Some(Value::String(text)) => text,
            _ => return None,
        },
        _ => return None,
    };
    if content.trim().is_empty() {
        None
    } else {
        Some(content)
    }
}

//! JSON-over-HTTP forward transport.
//!
//! Calls are sent as `POST {endpoint}/invoke` with the body
//! `{"action", "parameters"}`. A 2xx response carries either
//! an envelope `{"success": bool, "payload"?, "error"?}` or a bare JSON
//! value treated as the payload. Non-2xx responses with a JSON `error` or
//! `message` field are target errors; anything unparseable is a transport
//! error.

use crate::registry::domain::ServiceDescriptor;
use crate::routing::ports::{ForwardError, ForwardTransport};
use async_trait::async_trait;
use serde_json::{Map, Value, json};

/// Path appended to a component endpoint for forwarded calls.
pub const INVOKE_PATH: &str = "invoke";

/// Forwards calls to components over HTTP.
#[derive(Debug, Clone)]
pub struct HttpForwardTransport {
    client: reqwest::Client,
}

impl HttpForwardTransport {
    /// Creates a transport that reuses `client`.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ForwardTransport for HttpForwardTransport {
    async fn forward(
        &self,
        descriptor: &ServiceDescriptor,
        action: &str,
        parameters: &Map<String, Value>,
    ) -> Result<Value, ForwardError> {
        let url = descriptor.endpoint().join(INVOKE_PATH);
        let body = json!({ "action": action, "parameters": parameters });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status();
        let decoded = response.json::<Value>().await;

        match (status.is_success(), decoded) {
            (true, Ok(value)) => interpret_success(value),
            (true, Err(err)) => Err(ForwardError::Transport(format!(
                "malformed response body: {err}"
            ))),
            (false, Ok(value)) => Err(error_message(&value).map_or_else(
                || ForwardError::Transport(format!("HTTP {status} without error detail")),
                ForwardError::Target,
            )),
            (false, Err(_)) => Err(ForwardError::Transport(format!(
                "HTTP {status} with unparseable body"
            ))),
        }
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> ForwardError {
    if err.is_timeout() {
        ForwardError::Timeout(err.to_string())
    } else {
        ForwardError::Transport(err.to_string())
    }
}

fn interpret_success(value: Value) -> Result<Value, ForwardError> {
    let Value::Object(mut envelope) = value else {
        return Ok(value);
    };
    match envelope.get("success").and_then(Value::as_bool) {
        Some(false) => Err(ForwardError::Target(
            error_message(&Value::Object(envelope))
                .unwrap_or_else(|| "target reported failure".to_owned()),
        )),
        Some(true) => Ok(envelope.remove("payload").unwrap_or(Value::Object(envelope))),
        None => Ok(Value::Object(envelope)),
    }
}

fn error_message(value: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key))
        .map(|detail| {
            detail
                .as_str()
                .map_or_else(|| detail.to_string(), ToOwned::to_owned)
        })
}

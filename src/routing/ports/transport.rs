//! Transport port carrying a forwarded call to a component.

use crate::registry::domain::ServiceDescriptor;
use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Failures reported by a forward transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForwardError {
    /// The transport gave up waiting for the target.
    #[error("forward timed out: {0}")]
    Timeout(String),
    /// The call failed at the network level or the response was malformed.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The target returned a well-formed application error.
    #[error("{0}")]
    Target(String),
}

/// Delivers an action and its parameters to a component endpoint.
///
/// Implementations perform no retries and need not enforce the request
/// deadline; the router bounds every call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForwardTransport: Send + Sync {
    /// Forwards `action` with `parameters` to `descriptor`'s endpoint.
    async fn forward(
        &self,
        descriptor: &ServiceDescriptor,
        action: &str,
        parameters: &Map<String, Value>,
    ) -> Result<Value, ForwardError>;
}

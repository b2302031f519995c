//! AI-assist collaborator port.

use crate::creation::domain::ArtifactKind;
use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;

/// Failure reported by an AI-assist collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AiAssistError {
    /// The collaborator could not be reached or refused the call.
    #[error("assist unavailable: {0}")]
    Unavailable(String),
    /// The collaborator did not answer before the deadline.
    #[error("assist timed out")]
    Timeout,
    /// The collaborator answered with an application error.
    #[error("assist rejected the prompt: {0}")]
    Rejected(String),
    /// The collaborator answered without usable content.
    #[error("assist returned no content")]
    EmptyContent,
}

/// Generates artifact content from a prompt.
///
/// The engine bounds each call with its own generation timeout, so
/// implementations may treat `deadline` as advisory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AiAssist: Send + Sync {
    /// Generates content of `kind` for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        kind: ArtifactKind,
        deadline: Instant,
    ) -> Result<String, AiAssistError>;
}

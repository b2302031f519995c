//! Creation result model.

use super::{ArtifactKind, CreationMetadata};
use crate::failure::FailureKind;
use serde::{Deserialize, Serialize};

/// Outcome returned by the creation engine.
///
/// Only a security-gate rejection is unsuccessful; every other path
/// produces content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationResult {
    success: bool,
    artifact_kind: Option<ArtifactKind>,
    content: Option<String>,
    metadata: Option<CreationMetadata>,
    error_kind: Option<FailureKind>,
    message: Option<String>,
}

impl CreationResult {
    /// Creates a successful result.
    #[must_use]
    pub fn created(
        artifact_kind: ArtifactKind,
        content: impl Into<String>,
        metadata: CreationMetadata,
    ) -> Self {
        Self {
            success: true,
            artifact_kind: Some(artifact_kind),
            content: Some(content.into()),
            metadata: Some(metadata),
            error_kind: None,
            message: None,
        }
    }

    /// Creates a security-gate rejection.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            artifact_kind: None,
            content: None,
            metadata: None,
            error_kind: Some(FailureKind::ValidationError),
            message: Some(message.into()),
        }
    }

    /// Returns whether content was produced.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the artifact kind, if created.
    #[must_use]
    pub const fn artifact_kind(&self) -> Option<ArtifactKind> {
        self.artifact_kind
    }

    /// Returns the artifact content, if created.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the generation metadata, if created.
    #[must_use]
    pub const fn metadata(&self) -> Option<&CreationMetadata> {
        self.metadata.as_ref()
    }

    /// Returns the failure kind, if rejected.
    #[must_use]
    pub const fn error_kind(&self) -> Option<FailureKind> {
        self.error_kind
    }

    /// Returns the rejection message, if rejected.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

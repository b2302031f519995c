//! Provenance and quality metadata attached to created artifacts.

use super::ArtifactKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Strategy that produced an artifact's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    /// The primary AI-assist collaborator.
    AiPrimary,
    /// The secondary AI-assist collaborator.
    AiSecondary,
    /// The deterministic template generator.
    Template,
}

/// Outcome of intent classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Selected artifact kind.
    pub kind: ArtifactKind,
    /// Whether lexical signals tied and the category default broke the tie.
    pub ambiguous: bool,
}

impl Classification {
    /// Creates an unambiguous classification.
    #[must_use]
    pub const fn certain(kind: ArtifactKind) -> Self {
        Self {
            kind,
            ambiguous: false,
        }
    }

    /// Creates a classification decided by tie-breaking.
    #[must_use]
    pub const fn ambiguous(kind: ArtifactKind) -> Self {
        Self {
            kind,
            ambiguous: true,
        }
    }
}

/// Non-fatal quality-gate finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityWarning {
    /// Machine-readable rule name, such as `max_lines`.
    pub rule: String,
    /// Human-readable description.
    pub message: String,
}

impl QualityWarning {
    /// Creates a warning for `rule`.
    #[must_use]
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Metadata describing how an artifact was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationMetadata {
    /// Strategy that produced the content.
    pub generation_method: GenerationMethod,
    /// Provider id for AI generation, `None` for templates.
    pub provider: Option<String>,
    /// Classification that selected the artifact kind.
    pub classification: Classification,
    /// Absorbed AI-assist failures, in attempt order.
    pub ai_failures: Vec<String>,
    /// Quality-gate findings.
    pub quality_warnings: Vec<QualityWarning>,
    /// SHA-256 of the content, lowercase hex.
    pub content_digest: String,
    /// When the engine accepted the request.
    pub started_at: DateTime<Utc>,
    /// When the artifact was finalised.
    pub completed_at: DateTime<Utc>,
}

impl CreationMetadata {
    /// Returns whether any quality warning was recorded.
    #[must_use]
    pub fn has_quality_warnings(&self) -> bool {
        !self.quality_warnings.is_empty()
    }
}

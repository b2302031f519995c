//! Artifact kinds the engine can produce.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind of artifact produced by the creation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Prose document or outline.
    Document,
    /// Source code.
    Code,
    /// Runnable prototype.
    Prototype,
    /// Command-line tool.
    Tool,
    /// Written analysis or report.
    Analysis,
    /// Design specification.
    Design,
}

/// Error returned when parsing an unknown artifact kind.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown artifact kind: {0}")]
pub struct ParseArtifactKindError(pub String);

impl ArtifactKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Document,
        Self::Code,
        Self::Prototype,
        Self::Tool,
        Self::Analysis,
        Self::Design,
    ];

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Code => "code",
            Self::Prototype => "prototype",
            Self::Tool => "tool",
            Self::Analysis => "analysis",
            Self::Design => "design",
        }
    }

    /// Returns whether the artifact is program text subject to the
    /// line-count and syntax checks.
    #[must_use]
    pub const fn is_code_like(self) -> bool {
        matches!(self, Self::Code | Self::Prototype | Self::Tool)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ArtifactKind {
    type Error = ParseArtifactKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseArtifactKindError(value.to_owned()))
    }
}

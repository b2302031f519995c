//! Quality and security policies applied by the creation gates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thresholds for the non-fatal quality gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityPolicy {
    /// Minimum line count for code-like artifacts.
    pub min_lines: usize,
    /// Maximum line count for code-like artifacts.
    pub max_lines: usize,
    /// Minimum content length in characters.
    pub min_content_length: usize,
    /// Maximum content length in characters.
    pub max_content_length: usize,
    /// Whether code-like artifacts get a delimiter balance check.
    pub check_syntax: bool,
    /// Whether code-like artifacts must contain at least one comment.
    pub require_documentation: bool,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            min_lines: 3,
            max_lines: 2_000,
            min_content_length: 20,
            max_content_length: 200_000,
            check_syntax: true,
            require_documentation: false,
        }
    }
}

/// Limits enforced by the security gate before any generation work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityPolicy {
    /// Maximum intent text length in characters.
    pub max_input_length: usize,
    /// Case-insensitive substrings that reject a request.
    pub blocked_keywords: Vec<String>,
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            max_input_length: 10_000,
            blocked_keywords: vec![
                "rm -rf".to_owned(),
                "drop table".to_owned(),
                "<script".to_owned(),
            ],
        }
    }
}

/// Reason the security gate rejected an intent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SecurityViolation {
    /// The intent text exceeded the configured length.
    #[error("intent text is {length} characters, limit is {limit}")]
    InputTooLong {
        /// Observed length.
        length: usize,
        /// Configured limit.
        limit: usize,
    },
    /// The intent text contained a blocked keyword.
    #[error("intent text contains blocked keyword '{0}'")]
    BlockedKeyword(String),
}

impl SecurityPolicy {
    /// Checks `intent_text` against the policy.
    ///
    /// # Errors
    ///
    /// Returns a [`SecurityViolation`] describing the first rule broken.
    pub fn check(&self, intent_text: &str) -> Result<(), SecurityViolation> {
        let length = intent_text.chars().count();
        if length > self.max_input_length {
            return Err(SecurityViolation::InputTooLong {
                length,
                limit: self.max_input_length,
            });
        }

        let haystack = intent_text.to_lowercase();
        self.blocked_keywords
            .iter()
            .map(|keyword| keyword.trim())
            .filter(|keyword| !keyword.is_empty())
            .find(|keyword| haystack.contains(&keyword.to_lowercase()))
            .map_or(Ok(()), |keyword| {
                Err(SecurityViolation::BlockedKeyword(keyword.to_owned()))
            })
    }
}

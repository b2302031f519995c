//! Creation request model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Intent handed to the creation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationRequest {
    intent_text: String,
    intent_category: String,
    #[serde(default)]
    context: Map<String, Value>,
    #[serde(default)]
    constraints: Vec<String>,
}

impl CreationRequest {
    /// Creates a request with empty context and no constraints.
    #[must_use]
    pub fn new(intent_text: impl Into<String>, intent_category: impl Into<String>) -> Self {
        Self {
            intent_text: intent_text.into(),
            intent_category: intent_category.into(),
            context: Map::new(),
            constraints: Vec::new(),
        }
    }

    /// Replaces the free-form context map.
    #[must_use]
    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = context;
        self
    }

    /// Appends constraints.
    #[must_use]
    pub fn with_constraints<I, S>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints.extend(constraints.into_iter().map(Into::into));
        self
    }

    /// Returns the caller's intent text.
    #[must_use]
    pub fn intent_text(&self) -> &str {
        &self.intent_text
    }

    /// Returns the logical intent category.
    #[must_use]
    pub fn intent_category(&self) -> &str {
        &self.intent_category
    }

    /// Returns the context map.
    #[must_use]
    pub const fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    /// Returns the constraints.
    #[must_use]
    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }
}

//! Port contracts for intent classification and AI-assisted generation.

mod ai;
mod classifier;

pub use ai::{AiAssist, AiAssistError};
pub use classifier::IntentClassifier;

#[cfg(test)]
pub use ai::MockAiAssist;

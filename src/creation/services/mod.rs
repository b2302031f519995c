//! Application services for artifact creation.

mod engine;
mod quality;

pub use engine::{AiProvider, CreationEngine, CreationEngineConfig};
pub use quality::{content_digest, quality_warnings};

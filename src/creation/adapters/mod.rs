//! Adapter implementations for creation ports.

mod lexical;
mod routed;
mod template;

pub use lexical::LexicalIntentClassifier;
pub use routed::{GENERATE_ACTION, RoutedAiAssist};
pub use template::TemplateGenerator;

//! Intent classification port.

use crate::creation::domain::{ArtifactKind, Classification, CreationRequest};

/// Maps an intent to the artifact kind the engine should produce.
///
/// Classification is advisory: `primary_kind` is the category's
/// configured default and breaks ties.
pub trait IntentClassifier: Send + Sync {
    /// Classifies `request`.
    fn classify(&self, request: &CreationRequest, primary_kind: ArtifactKind) -> Classification;
}

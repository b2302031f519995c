//! Domain model for creation requests, results, and policies.

mod kind;
mod metadata;
mod policy;
mod request;
mod result;

pub use kind::{ArtifactKind, ParseArtifactKindError};
pub use metadata::{Classification, CreationMetadata, GenerationMethod, QualityWarning};
pub use policy::{QualityPolicy, SecurityPolicy, SecurityViolation};
pub use request::CreationRequest;
pub use result::CreationResult;

//! Cascade candidate specs.

use super::CascadeDomainError;
use crate::registry::domain::ServiceId;
use std::fmt;
use std::str::FromStr;

/// Sentinel spec naming the creation engine.
pub const CREATION_ENGINE_ID: &str = "creation_engine";

/// Prefix of capability candidate specs.
pub const CAPABILITY_PREFIX: &str = "capability:";

/// One entry of a cascade chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CascadeCandidate {
    /// A specific registered component.
    Service(ServiceId),
    /// Every component claiming the capability, expanded at resolution time.
    Capability(String),
    /// The terminal creation engine.
    CreationEngine,
}

impl CascadeCandidate {
    /// Parses a spec: a service id, `capability:<name>`, or
    /// `creation_engine`.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeDomainError`] when the spec is empty or names an
    /// invalid service id or an empty capability.
    pub fn parse(spec: &str) -> Result<Self, CascadeDomainError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(CascadeDomainError::EmptyCandidate);
        }
        if trimmed.eq_ignore_ascii_case(CREATION_ENGINE_ID) {
            return Ok(Self::CreationEngine);
        }
        if let Some(capability) = trimmed.strip_prefix(CAPABILITY_PREFIX) {
            let name = capability.trim().to_lowercase();
            if name.is_empty() {
                return Err(CascadeDomainError::EmptyCapability);
            }
            return Ok(Self::Capability(name));
        }
        Ok(Self::Service(ServiceId::new(trimmed)?))
    }

    /// Returns whether this is the creation engine sentinel.
    #[must_use]
    pub const fn is_creation_engine(&self) -> bool {
        matches!(self, Self::CreationEngine)
    }
}

impl FromStr for CascadeCandidate {
    type Err = CascadeDomainError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        Self::parse(spec)
    }
}

impl fmt::Display for CascadeCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(id) => write!(f, "{id}"),
            Self::Capability(name) => write!(f, "{CAPABILITY_PREFIX}{name}"),
            Self::CreationEngine => f.write_str(CREATION_ENGINE_ID),
        }
    }
}

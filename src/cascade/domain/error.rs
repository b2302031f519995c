//! Cascade domain errors.

use crate::registry::domain::RegistryDomainError;
use thiserror::Error;

/// Errors raised while building cascade chains.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CascadeDomainError {
    /// A candidate spec was empty.
    #[error("cascade candidate must not be empty")]
    EmptyCandidate,
    /// A `capability:` spec named no capability.
    #[error("capability candidate must name a capability")]
    EmptyCapability,
    /// A service candidate was not a valid service id.
    #[error("invalid cascade candidate: {0}")]
    InvalidCandidate(#[from] RegistryDomainError),
    /// The creation engine appeared before the end of a chain.
    #[error("creation engine must be the last candidate of chain '{category}'")]
    EngineNotTerminal {
        /// Category whose chain was rejected.
        category: String,
    },
}

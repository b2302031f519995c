//! Domain model for cascade chains and their outcomes.

mod candidate;
mod chain;
mod config;
mod error;
mod request;

pub use candidate::{CAPABILITY_PREFIX, CREATION_ENGINE_ID, CascadeCandidate};
pub use chain::CascadeChain;
pub use config::CascadeConfig;
pub use error::CascadeDomainError;
pub use request::{CascadeRequest, CascadeResponse};

//! Domain model for health probing.

mod policy;
mod probe;

pub use policy::{HealthPolicy, HealthPolicyError};
pub use probe::{ProbeCycleReport, ProbeOutcome};

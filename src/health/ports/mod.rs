//! Port contracts for health probing.

mod prober;

pub use prober::HealthProber;

#[cfg(test)]
pub use prober::MockHealthProber;

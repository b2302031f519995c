//! Request routing to registered components.
//!
//! The router is the single place where inter-component calls are made.
//! It resolves a target through the registry, fails fast on targets known
//! to be unreachable, forwards within the request deadline, and classifies
//! every failure into one [`crate::failure::FailureKind`]. It never
//! retries; that decision belongs to the caller.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

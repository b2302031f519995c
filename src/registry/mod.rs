//! Service registry for independently deployed components.
//!
//! The registry is the only shared mutable state in the coordinator. It
//! holds one descriptor per component id and exposes it exclusively
//! through the [`services::ServiceRegistryService`] API; no caller ever
//! holds a reference into the underlying map. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

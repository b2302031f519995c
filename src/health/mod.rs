//! Background liveness monitoring for registered components.
//!
//! A single scheduled task probes every descriptor once per cycle with
//! bounded fan-out, writes outcomes back through the registry service,
//! and forces descriptors with stale heartbeats to `unreachable`. Probe
//! failures never deregister a component.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

//! Adapter implementations for registry ports.

pub mod memory;

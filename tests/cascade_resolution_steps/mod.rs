//! Step definitions for cascade resolution scenarios.

mod given;
mod then;
mod when;
pub mod world;

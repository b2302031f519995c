//! Application services for cascade resolution.

mod controller;

pub use controller::CascadeController;

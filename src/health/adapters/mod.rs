//! Adapter implementations for the prober port.

mod http;
mod scripted;

pub use http::HttpHealthProber;
pub use scripted::ScriptedHealthProber;

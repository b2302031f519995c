//! Adapter implementations for the forward transport port.

mod http;
mod memory;

pub use http::{HttpForwardTransport, INVOKE_PATH};
pub use memory::{InMemoryTransport, RecordedCall};

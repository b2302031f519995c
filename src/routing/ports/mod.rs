//! Port contracts for request forwarding.

mod forwarder;
mod transport;

pub use forwarder::RequestForwarder;
pub use transport::{ForwardError, ForwardTransport};

#[cfg(test)]
pub use forwarder::MockRequestForwarder;
#[cfg(test)]
pub use transport::MockForwardTransport;

//! Domain model for routed requests and their results.

mod request;
mod result;

pub use request::RouteRequest;
pub use result::RouteResult;

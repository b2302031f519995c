//! Application services for request routing.

mod router;

pub use router::RequestRouter;

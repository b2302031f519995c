//! In-memory descriptor store.

mod repository;

pub use repository::InMemoryServiceRegistry;

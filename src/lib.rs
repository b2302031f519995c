//! Switchyard: registry, routing, and fallback coordination for
//! independently deployed service components.
//!
//! Components register themselves, report liveness, and receive forwarded
//! work. When no specialised component can satisfy a request, an ordered
//! fallback chain ends in a creation engine that always produces a usable
//! artifact unless the input fails its security gate.
//!
//! # Architecture
//!
//! Each component is a hexagonal slice:
//!
//! - **Domain**: Pure types and invariants with no infrastructure dependencies
//! - **Ports**: Trait seams for storage, probing, transport, and AI assistance
//! - **Adapters**: In-memory, scripted, and HTTP implementations of ports
//! - **Services**: Orchestration over ports
//!
//! # Modules
//!
//! - [`registry`]: Component descriptors and their lifecycle
//! - [`health`]: Scheduled probing and stale-heartbeat detection
//! - [`routing`]: Deadline-bounded forwarding with classified failures
//! - [`cascade`]: Ordered fallback chains ending in the creation engine
//! - [`creation`]: The always-succeeding terminal generator
//! - [`coordinator`]: A facade wiring every component from settings

pub mod cascade;
pub mod clock;
pub mod config;
pub mod coordinator;
pub mod creation;
pub mod failure;
pub mod health;
pub mod registry;
pub mod routing;
pub mod telemetry;

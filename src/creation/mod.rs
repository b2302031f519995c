//! Creation fallback engine: the terminal, always-succeeding cascade stage.
//!
//! The engine gates inbound intent text, classifies it into an artifact
//! kind, generates content through AI-assist collaborators or a
//! deterministic template, and attaches quality findings as metadata.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

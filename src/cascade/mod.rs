//! Fallback cascade: ordered candidate chains ending in the creation engine.
//!
//! A chain is tried strictly in order through the request router. The
//! first success is returned; intermediate failures are logged and
//! absorbed. The creation engine is always the last candidate, so a
//! request that reaches it before its deadline always gets an answer.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;

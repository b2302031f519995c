//! Unit tests for the creation engine.

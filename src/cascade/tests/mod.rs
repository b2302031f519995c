//! Unit tests for cascade resolution.

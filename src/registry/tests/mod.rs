//! Unit tests for the service registry.

mod domain_tests;

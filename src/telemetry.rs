//! Tracing subscriber initialisation.

use std::env;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for filter directives.
pub const FILTER_ENV: &str = "RUST_LOG";

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// A filter directive could not be parsed.
    #[error("invalid filter directive '{directive}': {reason}")]
    InvalidFilter {
        /// Offending directive.
        directive: String,
        /// Parser message.
        reason: String,
    },
    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs a formatted subscriber filtered by `RUST_LOG`.
///
/// When `RUST_LOG` is unset or empty, `default_directive` (for example
/// `"switchyard=info"`) is used instead.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for unparseable directives
/// and [`TelemetryError::Install`] when a global subscriber already exists.
pub fn init_tracing(default_directive: &str) -> Result<(), TelemetryError> {
    let directive = env::var(FILTER_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default_directive.to_owned());
    let filter = build_filter(&directive)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|error| TelemetryError::Install(error.to_string()))
}

fn build_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::builder()
        .parse(directive)
        .map_err(|error| TelemetryError::InvalidFilter {
            directive: directive.to_owned(),
            reason: error.to_string(),
        })
}

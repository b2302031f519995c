//! Error types for registry domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryDomainError {
    /// The service id is empty after trimming.
    #[error("service id must not be empty")]
    EmptyServiceId,

    /// The service id contains characters outside `[A-Za-z0-9._-]`.
    #[error(
        "service id '{0}' contains invalid characters (only alphanumerics, '.', '_' and '-' allowed)"
    )]
    InvalidServiceId(String),

    /// The service id exceeds the 100-character limit.
    #[error("service id exceeds 100 character limit: {0}")]
    ServiceIdTooLong(String),

    /// The endpoint is empty after trimming.
    #[error("service endpoint must not be empty")]
    EmptyEndpoint,

    /// The endpoint is not an `http://` or `https://` URL with a host.
    #[error("service endpoint '{0}' must be an http:// or https:// URL")]
    InvalidEndpoint(String),

    /// A capability label is empty after trimming.
    #[error("capability labels must not be empty")]
    EmptyCapability,
}

/// Error returned while parsing a service status from its wire form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown service status: {0}")]
pub struct ParseServiceStatusError(pub String);

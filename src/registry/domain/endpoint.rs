//! Validated component endpoint URL.

use super::RegistryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const SCHEMES: [&str; 2] = ["http://", "https://"];

/// Base URL at which a registered component accepts forwarded requests.
///
/// Trailing slashes are stripped so paths can be joined uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceEndpoint(String);

impl ServiceEndpoint {
    /// Creates a validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyEndpoint`] when the value is
    /// blank, or [`RegistryDomainError::InvalidEndpoint`] when it lacks an
    /// `http://`/`https://` scheme, a host, or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, RegistryDomainError> {
        let raw = value.into();
        let trimmed = raw.trim().trim_end_matches('/');

        if trimmed.is_empty() {
            return Err(RegistryDomainError::EmptyEndpoint);
        }

        let host = SCHEMES
            .iter()
            .find_map(|scheme| trimmed.strip_prefix(scheme))
            .ok_or_else(|| RegistryDomainError::InvalidEndpoint(raw.clone()))?;

        if host.is_empty() || host.starts_with('/') || trimmed.chars().any(char::is_whitespace) {
            return Err(RegistryDomainError::InvalidEndpoint(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins a relative path onto the endpoint.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() {
            self.0.clone()
        } else {
            format!("{}/{relative}", self.0)
        }
    }
}

impl TryFrom<String> for ServiceEndpoint {
    type Error = RegistryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServiceEndpoint> for String {
    fn from(value: ServiceEndpoint) -> Self {
        value.0
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Validated service identifier type.

use super::RegistryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a service id.
const MAX_ID_LENGTH: usize = 100;

/// Globally unique identifier of a registered component.
///
/// Ids are chosen by the component itself and are stable across
/// re-registration, so they are validated strings rather than generated
/// UUIDs. Case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceId(String);

impl ServiceId {
    /// Creates a validated service id.
    ///
    /// The input is trimmed. Only characters in `[A-Za-z0-9._-]` are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyServiceId`] when the value is
    /// empty after trimming, [`RegistryDomainError::ServiceIdTooLong`] when
    /// it exceeds 100 characters, or
    /// [`RegistryDomainError::InvalidServiceId`] when it contains other
    /// characters.
    pub fn new(value: impl Into<String>) -> Result<Self, RegistryDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(RegistryDomainError::EmptyServiceId);
        }

        if trimmed.len() > MAX_ID_LENGTH {
            return Err(RegistryDomainError::ServiceIdTooLong(raw));
        }

        let is_valid = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

        if !is_valid {
            return Err(RegistryDomainError::InvalidServiceId(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceId {
    type Error = RegistryDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServiceId> for String {
    fn from(value: ServiceId) -> Self {
        value.0
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

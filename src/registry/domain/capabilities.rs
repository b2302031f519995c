//! Capability labels claimed by a component.

use super::RegistryDomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Normalised set of capability labels.
///
/// Labels are trimmed, lowercased, and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCapabilities(BTreeSet<String>);

impl ServiceCapabilities {
    /// Creates a capability set from raw labels.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyCapability`] when any label is
    /// blank after trimming.
    pub fn new<I, S>(labels: I) -> Result<Self, RegistryDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| {
                let normalized = normalize(label.as_ref());
                if normalized.is_empty() {
                    Err(RegistryDomainError::EmptyCapability)
                } else {
                    Ok(normalized)
                }
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Returns whether the set claims the given capability.
    #[must_use]
    pub fn contains(&self, capability: &str) -> bool {
        self.0.contains(&normalize(capability))
    }

    /// Iterates over the labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no capabilities are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_ascii_lowercase()
}

//! Cascade configuration: per-category chains plus a default.

use super::{CascadeChain, CascadeDomainError};
use std::collections::HashMap;

/// Category name of the default chain.
pub(crate) const DEFAULT_CATEGORY: &str = "default";

/// Read-only chain table consulted at resolution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeConfig {
    default_chain: CascadeChain,
    chains: HashMap<String, CascadeChain>,
    skip_unreachable: bool,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            default_chain: CascadeChain::engine_only(DEFAULT_CATEGORY),
            chains: HashMap::new(),
            skip_unreachable: true,
        }
    }
}

impl CascadeConfig {
    /// Creates a configuration whose default chain is parsed from `specs`.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeDomainError`] when a spec is invalid.
    pub fn new<I, S>(default_specs: I) -> Result<Self, CascadeDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            default_chain: CascadeChain::parse(DEFAULT_CATEGORY, default_specs)?,
            ..Self::default()
        })
    }

    /// Configures the chain for `category`.
    ///
    /// Categories are matched case-insensitively. An empty spec list
    /// removes the category's chain so it falls back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeDomainError`] when a spec is invalid.
    pub fn with_chain<I, S>(
        mut self,
        category: &str,
        specs: I,
    ) -> Result<Self, CascadeDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = normalize(category);
        let parsed = specs.into_iter().collect::<Vec<_>>();
        if parsed.is_empty() {
            self.chains.remove(&key);
        } else {
            let chain = CascadeChain::parse(key.as_str(), parsed)?;
            self.chains.insert(key, chain);
        }
        Ok(self)
    }

    /// Sets whether candidates already known unreachable are skipped.
    #[must_use]
    pub const fn with_skip_unreachable(mut self, skip: bool) -> Self {
        self.skip_unreachable = skip;
        self
    }

    /// Returns the chain for `category`, or the default chain.
    #[must_use]
    pub fn chain_for(&self, category: &str) -> &CascadeChain {
        self.chains
            .get(&normalize(category))
            .unwrap_or(&self.default_chain)
    }

    /// Returns the default chain.
    #[must_use]
    pub const fn default_chain(&self) -> &CascadeChain {
        &self.default_chain
    }

    /// Returns whether unreachable candidates are skipped.
    #[must_use]
    pub const fn skip_unreachable(&self) -> bool {
        self.skip_unreachable
    }
}

fn normalize(category: &str) -> String {
    category.trim().to_lowercase()
}

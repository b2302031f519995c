//! Ordered cascade chains.

use super::{CascadeCandidate, CascadeDomainError};

/// Ordered candidates tried for one intent category.
///
/// A chain always ends with [`CascadeCandidate::CreationEngine`] and
/// contains it exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeChain {
    category: String,
    candidates: Vec<CascadeCandidate>,
}

impl CascadeChain {
    /// Builds a chain, appending the creation engine when it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeDomainError::EngineNotTerminal`] when the creation
    /// engine appears anywhere but last.
    pub fn new<I>(category: impl Into<String>, candidates: I) -> Result<Self, CascadeDomainError>
    where
        I: IntoIterator<Item = CascadeCandidate>,
    {
        let name = category.into();
        let mut ordered = candidates.into_iter().collect::<Vec<_>>();
        let engine_positions = ordered
            .iter()
            .filter(|candidate| candidate.is_creation_engine())
            .count();
        match (engine_positions, ordered.last()) {
            (0, _) => ordered.push(CascadeCandidate::CreationEngine),
            (1, Some(CascadeCandidate::CreationEngine)) => {}
            _ => return Err(CascadeDomainError::EngineNotTerminal { category: name }),
        }
        Ok(Self {
            category: name,
            candidates: ordered,
        })
    }

    /// Builds a chain holding only the creation engine.
    #[must_use]
    pub fn engine_only(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            candidates: vec![CascadeCandidate::CreationEngine],
        }
    }

    /// Parses candidate specs and builds a chain.
    ///
    /// # Errors
    ///
    /// Returns [`CascadeDomainError`] when a spec is invalid or the
    /// creation engine is not last.
    pub fn parse<I, S>(category: impl Into<String>, specs: I) -> Result<Self, CascadeDomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates = specs
            .into_iter()
            .map(|spec| CascadeCandidate::parse(spec.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(category, candidates)
    }

    /// Returns the chain's category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the candidates in attempt order.
    #[must_use]
    pub fn candidates(&self) -> &[CascadeCandidate] {
        &self.candidates
    }
}

//! Per-resolution selector match memo.
//!
//! One cache lives for exactly one element resolution. Matching is stable while the
//! element is being styled, so each selector is evaluated at most once.

use crate::PseudoId;
use crate::matcher::MatchResult;

/// Memoized outcome for one selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchState {
    #[default]
    Unknown,
    Invalid,
    Applies,
    AppliesPseudo(PseudoId),
}

impl From<MatchResult> for MatchState {
    #[inline]
    fn from(result: MatchResult) -> Self {
        match result {
            MatchResult::Invalid => Self::Invalid,
            MatchResult::Applies => Self::Applies,
            MatchResult::AppliesPseudo(pseudo) => Self::AppliesPseudo(pseudo),
        }
    }
}

/// Match states indexed by selector position in the cascade index.
#[derive(Debug, Default)]
pub struct MatchStateCache {
    /// One slot per indexed selector.
    states: Vec<MatchState>,
}

impl MatchStateCache {
    /// Cache sized for `selector_count` selectors, all `Unknown`.
    pub fn with_len(selector_count: usize) -> Self {
        Self {
            states: vec![MatchState::Unknown; selector_count],
        }
    }

    /// Cached state; out-of-range indices read as `Unknown`.
    #[inline]
    pub fn get(&self, selector_index: usize) -> MatchState {
        self.states
            .get(selector_index)
            .copied()
            .unwrap_or_default()
    }

    /// Cache a result.
    #[inline]
    pub fn set(&mut self, selector_index: usize, state: MatchState) {
        if let Some(slot) = self.states.get_mut(selector_index) {
            *slot = state;
        }
    }

    /// Return the cached state or compute and store it.
    pub fn get_or_insert_with<F: FnOnce() -> MatchResult>(
        &mut self,
        selector_index: usize,
        compute: F,
    ) -> MatchState {
        let cached = self.get(selector_index);
        if cached != MatchState::Unknown {
            return cached;
        }
        let state = MatchState::from(compute());
        self.set(selector_index, state);
        state
    }

    /// Forget everything, keeping the allocation.
    pub fn clear(&mut self) {
        self.states.fill(MatchState::Unknown);
    }
}

//! Score tags and caching.
//!
//! Candidates are re-scored many times during selection, so every schedule
//! memoizes the last score computed per cost function. The cost functions form
//! a closed set, so the cache is a fixed array indexed by [`CostKind`].

use std::sync::OnceLock;

/// Two scores closer than this are considered tied.
pub const SCORE_EPSILON: f64 = 1e-5;

/// Returns true if two scores are tied.
///
/// # Example
///
/// ```
/// use regatta_core::scores_tied;
///
/// assert!(scores_tied(1.0, 1.000001));
/// assert!(!scores_tied(1.0, 1.001));
/// ```
#[inline]
pub fn scores_tied(a: f64, b: f64) -> bool {
    (a - b).abs() < SCORE_EPSILON
}

/// Identifies a cost function for score caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostKind {
    /// Pairwise match fairness (phase 1).
    MatchMatrix,
    /// Boat usage and flight transitions (phase 2).
    BoatSchedule,
}

impl CostKind {
    const COUNT: usize = 2;

    fn index(self) -> usize {
        match self {
            CostKind::MatchMatrix => 0,
            CostKind::BoatSchedule => 1,
        }
    }
}

/// Write-once score slots, one per [`CostKind`].
///
/// Schedules are immutable after construction, so a cached score never
/// goes stale.
#[derive(Debug, Clone, Default)]
pub struct ScoreCache {
    slots: [OnceLock<f64>; CostKind::COUNT],
}

impl ScoreCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached score for `kind`, if any.
    pub fn get(&self, kind: CostKind) -> Option<f64> {
        self.slots[kind.index()].get().copied()
    }

    /// Returns the cached score for `kind`, computing it on first access.
    pub fn get_or_insert_with(&self, kind: CostKind, f: impl FnOnce() -> f64) -> f64 {
        *self.slots[kind.index()].get_or_init(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_computes_once_per_kind() {
        let cache = ScoreCache::new();
        let mut calls = 0;
        let first = cache.get_or_insert_with(CostKind::MatchMatrix, || {
            calls += 1;
            3.5
        });
        let second = cache.get_or_insert_with(CostKind::MatchMatrix, || {
            calls += 1;
            99.0
        });

        assert_eq!(first, 3.5);
        assert_eq!(second, 3.5);
        assert_eq!(calls, 1);
        assert_eq!(cache.get(CostKind::BoatSchedule), None);
    }

    #[test]
    fn tie_tolerance() {
        assert!(scores_tied(0.0, 0.0));
        assert!(scores_tied(10.0, 10.0 + SCORE_EPSILON / 2.0));
        assert!(!scores_tied(10.0, 10.0 + SCORE_EPSILON * 2.0));
    }
}

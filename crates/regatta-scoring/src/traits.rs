use regatta_core::{CostKind, Schedule};

/// A score of a schedule; lower is better.
///
/// Each implementation owns one [`CostKind`] slot of the schedule's score
/// cache. A run uses one instance per kind, so the slot identifies the
/// weights it was computed with.
pub trait CostFunction: Send + Sync {
    /// Cache slot of this cost function.
    fn kind(&self) -> CostKind;

    /// Computes the score from scratch.
    fn calculate(&self, schedule: &Schedule) -> f64;

    /// Returns the cached score, computing it on first use.
    fn score(&self, schedule: &Schedule) -> f64 {
        schedule
            .scores()
            .get_or_insert_with(self.kind(), || self.calculate(schedule))
    }
}

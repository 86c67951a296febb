//! Optimization phases.
//!
//! - [`MatchMatrixPhase`] - phase 1, beam search over flights
//! - [`BoatSchedulePhase`] - phase 2, boat and race order search
//! - [`Population`] - the truncation-selection population both use

mod boat_schedule;
mod match_matrix;
mod population;

#[cfg(test)]
mod tests;

pub use boat_schedule::BoatSchedulePhase;
pub use match_matrix::MatchMatrixPhase;
pub use population::{Individual, Population};

use regatta_core::Schedule;
use regatta_scoring::CostFunction;

use crate::scope::SolverScope;

/// Scores `candidate` and adds it to `population` unless it is a duplicate.
fn offer<C: CostFunction>(
    cost: &C,
    scope: &mut SolverScope,
    population: &mut Population,
    candidate: Schedule,
) {
    let inserted = population.insert_with(candidate, |candidate| cost.score(candidate));
    if inserted {
        scope.stats_mut().record_score_calculation();
    }
    scope.stats_mut().record_mutation(inserted);
}

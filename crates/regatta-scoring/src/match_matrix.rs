//! Pairing fairness.

use regatta_core::{CostKind, MatchMatrix, Schedule};

use crate::CostFunction;

/// Penalty factors for phantom padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchFairnessWeights {
    /// Weight of uneven phantom encounters across teams.
    pub factor_less_participants: f64,
    /// Weight of uneven phantom spread across the races of the last flight.
    pub factor_team_missing: f64,
}

impl Default for MatchFairnessWeights {
    fn default() -> Self {
        Self {
            factor_less_participants: 3.01,
            factor_team_missing: 20.01,
        }
    }
}

/// Scores how evenly teams meet each other.
///
/// The score is the sum of cubed deviations of every pair count from the mean
/// pair count. With phantom padding, the cubed deviations of the per-team
/// under-participation counts are added (scaled by
/// `factor_less_participants`), and so is the spread of phantom slots over
/// the races of the last flight (scaled by `factor_team_missing`).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use regatta_core::{Flight, Race, Schedule, ScheduleShape};
/// use regatta_scoring::{CostFunction, MatchMatrixCost};
///
/// let shape = ScheduleShape::new(4, 2, 2).unwrap();
/// let cost = MatchMatrixCost::default();
///
/// let base = Arc::new(Schedule::new(
///     shape,
///     Flight::new(vec![Race::new([0, 1]), Race::new([2, 3])]),
/// ));
/// let repeat = Schedule::extend(&base, Flight::new(vec![Race::new([0, 1]), Race::new([2, 3])]));
/// let rotate = Schedule::extend(&base, Flight::new(vec![Race::new([0, 2]), Race::new([1, 3])]));
///
/// assert!(cost.score(&rotate) < cost.score(&repeat));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatchMatrixCost {
    weights: MatchFairnessWeights,
}

impl MatchMatrixCost {
    pub fn new(weights: MatchFairnessWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &MatchFairnessWeights {
        &self.weights
    }

    /// Score of the pair counts and under-participation counts alone.
    pub fn matrix_cost(&self, matrix: &MatchMatrix) -> f64 {
        let avg = matrix.average();
        let mut cost: f64 = matrix
            .pair_counts()
            .iter()
            .map(|&count| (f64::from(count) - avg).powi(3).abs())
            .sum();

        let avg_under = matrix.average_under_participation();
        if avg_under > 0.0 {
            let under: f64 = matrix
                .under_participation_counts()
                .iter()
                .map(|&count| (avg_under - f64::from(count)).powi(3).abs())
                .sum();
            cost += under * self.weights.factor_less_participants;
        }
        cost
    }
}

impl CostFunction for MatchMatrixCost {
    fn kind(&self) -> CostKind {
        CostKind::MatchMatrix
    }

    fn calculate(&self, schedule: &Schedule) -> f64 {
        let mut cost = self.matrix_cost(schedule.match_matrix());

        let shape = schedule.shape();
        if !shape.is_full() && self.weights.factor_team_missing > 0.0 {
            let phantoms = schedule
                .last_flight()
                .races()
                .iter()
                .map(|race| race.phantom_count(shape.num_teams()));
            let (min, max) = phantoms.fold((usize::MAX, 0), |(min, max), n| {
                (min.min(n), max.max(n))
            });
            if max >= min {
                cost += (max - min) as f64 * self.weights.factor_team_missing;
            }
        }
        cost
    }
}

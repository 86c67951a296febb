//! Cost functions for regatta schedules.
//!
//! - [`MatchMatrixCost`] - pairing fairness, used while building flights
//! - [`BoatScheduleCost`] - boat usage and flight transitions, used once the
//!   pairings are fixed
//! - [`InterFlightStat`] - what happens between two consecutive flights
//!
//! Lower scores are better. Both cost functions memoize their result in the
//! schedule's [`ScoreCache`](regatta_core::ScoreCache).

mod boat_schedule;
mod match_matrix;
mod traits;
mod transition;


pub use boat_schedule::{BoatScheduleCost, BoatScheduleWeights};
pub use match_matrix::{MatchFairnessWeights, MatchMatrixCost};
pub use traits::CostFunction;
pub use transition::{shuttles_for, InterFlightStat};

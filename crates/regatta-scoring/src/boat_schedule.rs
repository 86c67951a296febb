//! Boat usage and transition fairness.

use regatta_core::{BoatMatrix, CostKind, Schedule};

use crate::transition::{shuttles_for, InterFlightStat};
use crate::CostFunction;

/// Weights of the transition terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoatScheduleWeights {
    /// Weight of shuttle trips between the boundary races.
    pub stay_on_boat: f64,
    /// Weight of shuttle trips between a boundary race and the race next to
    /// the other boundary race.
    pub stay_on_shuttle: f64,
    /// Weight of teams switching boats across a boundary.
    pub change_between_boats: f64,
}

impl Default for BoatScheduleWeights {
    fn default() -> Self {
        Self {
            stay_on_boat: 1.0,
            stay_on_shuttle: 1.0,
            change_between_boats: 1.0,
        }
    }
}

/// Scores boat balance and transitions over the whole schedule.
///
/// The schedule is walked flight by flight while a running penalty grows:
/// each flight adds the truncated absolute deviations of the cumulative boat
/// matrix from its mean, and every boundary adds its transition terms. The
/// running penalty is added to the total after each flight, so early
/// imbalances and transitions weigh more than late ones.
///
/// Shuttle terms use `ceil(n / 2) + 0.01 * n` for `n` teams to transfer, so
/// that among equal shuttle counts fewer transfers win.
#[derive(Debug, Clone, Default)]
pub struct BoatScheduleCost {
    weights: BoatScheduleWeights,
}

impl BoatScheduleCost {
    pub fn new(weights: BoatScheduleWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &BoatScheduleWeights {
        &self.weights
    }

    fn transition_cost(&self, stat: &InterFlightStat) -> f64 {
        let w = &self.weights;
        stat.change_boats.len() as f64 * w.change_between_boats
            + shuttle_penalty(stat.shuttle_first_race) * w.stay_on_shuttle
            + shuttle_penalty(stat.shuttle_last_race) * w.stay_on_shuttle
            + shuttle_penalty(stat.shuttle_between_flights) * w.stay_on_boat
    }
}

fn shuttle_penalty(teams: usize) -> f64 {
    shuttles_for(teams) as f64 + 0.01 * teams as f64
}

impl CostFunction for BoatScheduleCost {
    fn kind(&self) -> CostKind {
        CostKind::BoatSchedule
    }

    fn calculate(&self, schedule: &Schedule) -> f64 {
        let shape = schedule.shape();
        let flights = schedule.flights();
        let mut matrix = BoatMatrix::new(shape.num_boats(), shape.padded_teams());

        let mut total = 0.0;
        let mut running = 0.0;
        for (index, flight) in flights.iter().enumerate() {
            matrix.add_flight(flight);
            let avg = matrix.average();
            running += matrix
                .cells()
                .map(|count| (f64::from(count) - avg).abs().trunc())
                .sum::<f64>();

            if index > 0 {
                let stat = InterFlightStat::between(&flights[index - 1], flight, shape.num_teams());
                running += self.transition_cost(&stat);
            }
            total += running;
        }
        total
    }
}

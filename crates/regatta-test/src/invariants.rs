//! Structural schedule checks.

use regatta_core::{Schedule, ScheduleShape};

/// Asserts that every flight has `races_per_flight` races of `num_boats`
/// slots and holds every padded team index exactly once.
pub fn assert_schedule_invariants(shape: &ScheduleShape, schedule: &Schedule) {
    for (index, flight) in schedule.flights().iter().enumerate() {
        assert_eq!(
            flight.len(),
            shape.races_per_flight(),
            "flight {index} race count"
        );
        for race in flight.races() {
            assert_eq!(race.len(), shape.num_boats(), "flight {index} race size");
        }
        let mut teams: Vec<_> = flight.team_slots().collect();
        teams.sort_unstable();
        assert_eq!(teams, shape.team_slots(), "flight {index} team slots");

        let phantoms: usize = flight
            .races()
            .iter()
            .map(|race| race.phantom_count(shape.num_teams()))
            .sum();
        assert_eq!(phantoms, shape.padded_teams() - shape.num_teams());
    }
}

//! Schedule builders.

use std::sync::Arc;

use regatta_core::{Flight, Race, Schedule, ScheduleShape, TeamId};

/// Creates a shape, panicking on invalid dimensions.
pub fn shape(teams: usize, boats: usize, flights: usize) -> ScheduleShape {
    ScheduleShape::new(teams, boats, flights).expect("valid test shape")
}

/// Creates a flight from race literals.
///
/// ```
/// let f = regatta_test::flight(&[&[0, 1], &[2, 3]]);
/// assert_eq!(f.len(), 2);
/// ```
pub fn flight(races: &[&[TeamId]]) -> Flight {
    races
        .iter()
        .map(|teams| Race::new(teams.iter().copied()))
        .collect()
}

/// Builds a (possibly partial) schedule flight by flight, the way the
/// optimizer extends branches.
pub fn build_schedule(shape: ScheduleShape, flights: &[&[&[TeamId]]]) -> Schedule {
    let mut iter = flights.iter();
    let first = iter.next().expect("at least one flight");
    let mut schedule = Arc::new(Schedule::new(shape, flight(first)));
    for races in iter {
        schedule = Arc::new(Schedule::extend(&schedule, flight(races)));
    }
    Arc::unwrap_or_clone(schedule)
}

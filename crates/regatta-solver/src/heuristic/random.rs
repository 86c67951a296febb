//! Random construction.

use rand::seq::SliceRandom;
use rand::Rng;
use regatta_core::{Flight, Race, Schedule, ScheduleShape};

/// Creates a random canonical flight.
///
/// All padded team indices are shuffled and cut into races of `num_boats`
/// slots; each race is then sorted and races are ordered by first team.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use regatta_core::ScheduleShape;
/// use regatta_solver::random_flight;
///
/// let shape = ScheduleShape::new(7, 3, 4).unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let flight = random_flight(&shape, &mut rng);
///
/// assert_eq!(flight.len(), 3);
/// assert!(flight.races().iter().all(|race| race.len() == 3));
/// ```
pub fn random_flight<R: Rng + ?Sized>(shape: &ScheduleShape, rng: &mut R) -> Flight {
    let mut teams = shape.team_slots();
    teams.shuffle(rng);
    let mut flight: Flight = teams
        .chunks(shape.num_boats())
        .map(|chunk| Race::new(chunk.iter().copied()))
        .collect();
    flight.canonicalize();
    flight
}

/// Shuffles the boat slots within every race of `flight`.
pub fn shuffle_teams<R: Rng + ?Sized>(flight: &mut Flight, rng: &mut R) {
    for race in flight.races_mut() {
        race.teams_mut().shuffle(rng);
    }
}

/// Returns a copy of `schedule` with the boat slots of every race shuffled.
pub fn shuffle_boats<R: Rng + ?Sized>(schedule: &Schedule, rng: &mut R) -> Schedule {
    schedule.map_flights(|flight| {
        let mut flight = flight.clone();
        shuffle_teams(&mut flight, rng);
        flight
    })
}

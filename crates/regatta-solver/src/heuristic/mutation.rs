//! Mutation operators.
//!
//! Every operator leaves its input untouched and returns a new schedule that
//! shares all unchanged flights with it. Race sizes and the set of teams per
//! flight are preserved. Operators that need two distinct races or slots
//! return an unchanged copy when the shape has only one.

use rand::Rng;
use regatta_core::Schedule;

/// Picks an index in `0..len` different from `first`.
fn other_index<R: Rng + ?Sized>(first: usize, len: usize, rng: &mut R) -> usize {
    (first + 1 + rng.random_range(0..len - 1)) % len
}

/// Swaps one team between two races of the last flight.
///
/// The flight is canonicalized afterwards so that equal pairings compare
/// equal.
pub fn swap_between_races<R: Rng + ?Sized>(schedule: &Schedule, rng: &mut R) -> Schedule {
    let mut flight = schedule.last_flight().clone();
    let races = flight.len();
    if races < 2 {
        return schedule.clone();
    }

    let r1 = rng.random_range(0..races);
    let r2 = other_index(r1, races, rng);
    let s1 = rng.random_range(0..flight.race(r1).len());
    let s2 = rng.random_range(0..flight.race(r2).len());

    let (low, high) = (r1.min(r2), r1.max(r2));
    let (s_low, s_high) = if r1 < r2 { (s1, s2) } else { (s2, s1) };
    let (head, tail) = flight.races_mut().split_at_mut(high);
    std::mem::swap(
        &mut head[low].teams_mut()[s_low],
        &mut tail[0].teams_mut()[s_high],
    );

    flight.canonicalize();
    schedule.with_last_flight(flight)
}

/// Swaps the boats of two teams within one race of a random flight.
pub fn swap_boats<R: Rng + ?Sized>(schedule: &Schedule, rng: &mut R) -> Schedule {
    let index = rng.random_range(0..schedule.len());
    let mut flight = schedule.flight(index).clone();
    let race = rng.random_range(0..flight.len());
    let slots = flight.race(race).len();
    if slots < 2 {
        return schedule.clone();
    }

    let a = rng.random_range(0..slots);
    let b = other_index(a, slots, rng);
    flight.races_mut()[race].swap_slots(a, b);
    schedule.with_flight(index, flight)
}

/// Swaps the sailing order of two races within a random flight.
pub fn swap_races<R: Rng + ?Sized>(schedule: &Schedule, rng: &mut R) -> Schedule {
    let index = rng.random_range(0..schedule.len());
    let mut flight = schedule.flight(index).clone();
    let races = flight.len();
    if races < 2 {
        return schedule.clone();
    }

    let a = rng.random_range(0..races);
    let b = other_index(a, races, rng);
    flight.swap_races(a, b);
    schedule.with_flight(index, flight)
}

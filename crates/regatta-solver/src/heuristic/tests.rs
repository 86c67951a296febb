use std::sync::Arc;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use regatta_core::{Schedule, ScheduleShape};
use regatta_test::{assert_schedule_invariants, build_schedule, shape};

use super::*;

fn random_schedule(shape: ScheduleShape, rng: &mut ChaCha8Rng) -> Schedule {
    let mut schedule = Arc::new(Schedule::new(shape, random_flight(&shape, rng)));
    for _ in 1..shape.flights() {
        schedule = Arc::new(Schedule::extend(&schedule, random_flight(&shape, rng)));
    }
    Arc::unwrap_or_clone(schedule)
}

fn is_canonical(schedule: &Schedule) -> bool {
    let mut flight = schedule.last_flight().clone();
    flight.canonicalize();
    &flight == schedule.last_flight()
}

fn shapes() -> impl Strategy<Value = (ScheduleShape, u64)> {
    (1usize..=6)
        .prop_flat_map(|boats| (Just(boats), boats..=30usize, 1usize..=4, any::<u64>()))
        .prop_map(|(boats, teams, flights, seed)| (shape(teams, boats, flights), seed))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn random_flights_are_valid((shape, seed) in shapes()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let schedule = random_schedule(shape, &mut rng);
        assert_schedule_invariants(&shape, &schedule);
        prop_assert!(is_canonical(&schedule));
    }

    #[test]
    fn swap_between_races_preserves_invariants((shape, seed) in shapes()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut schedule = random_schedule(shape, &mut rng);
        for _ in 0..200 {
            schedule = swap_between_races(&schedule, &mut rng);
            assert_schedule_invariants(&shape, &schedule);
            prop_assert!(is_canonical(&schedule));
            prop_assert_eq!(schedule.len(), shape.flights());
        }
    }

    #[test]
    fn swap_boats_keeps_pairings((shape, seed) in shapes()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut schedule = random_schedule(shape, &mut rng);
        let pairings = schedule.match_matrix().clone();
        for _ in 0..200 {
            schedule = swap_boats(&schedule, &mut rng);
            assert_schedule_invariants(&shape, &schedule);
            prop_assert_eq!(schedule.match_matrix(), &pairings);
        }
    }

    #[test]
    fn swap_races_keeps_pairings_and_boats((shape, seed) in shapes()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut schedule = random_schedule(shape, &mut rng);
        let pairings = schedule.match_matrix().clone();
        let boats = schedule.boat_matrix().clone();
        for _ in 0..200 {
            schedule = swap_races(&schedule, &mut rng);
            assert_schedule_invariants(&shape, &schedule);
            prop_assert_eq!(schedule.match_matrix(), &pairings);
            prop_assert_eq!(schedule.boat_matrix(), &boats);
        }
    }
}

#[test]
fn mutations_leave_input_untouched() {
    let s = shape(6, 2, 2);
    let original = build_schedule(s, &[&[&[0, 1], &[2, 3], &[4, 5]], &[&[0, 2], &[1, 4], &[3, 5]]]);
    let snapshot = original.to_flights();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for _ in 0..50 {
        let _ = swap_between_races(&original, &mut rng);
        let _ = swap_boats(&original, &mut rng);
        let _ = swap_races(&original, &mut rng);
    }
    assert_eq!(original.to_flights(), snapshot);
}

#[test]
fn swap_between_races_keeps_base() {
    let s = shape(6, 2, 2);
    let original = build_schedule(s, &[&[&[0, 1], &[2, 3], &[4, 5]], &[&[0, 2], &[1, 4], &[3, 5]]]);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mutated = swap_between_races(&original, &mut rng);

    assert_ne!(mutated, original);
    assert!(Arc::ptr_eq(&mutated.flights()[0], &original.flights()[0]));
    assert!(Arc::ptr_eq(mutated.base().unwrap(), original.base().unwrap()));
}

#[test]
fn degenerate_shapes_return_copies() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let one_race = build_schedule(shape(3, 3, 1), &[&[&[0, 1, 2]]]);
    assert_eq!(swap_between_races(&one_race, &mut rng), one_race);
    assert_eq!(swap_races(&one_race, &mut rng), one_race);

    let one_boat = build_schedule(shape(2, 1, 1), &[&[&[0], &[1]]]);
    assert_eq!(swap_boats(&one_boat, &mut rng), one_boat);
}

#[test]
fn random_flight_is_seed_reproducible() {
    let s = shape(10, 4, 1);
    let a = random_flight(&s, &mut ChaCha8Rng::seed_from_u64(42));
    let b = random_flight(&s, &mut ChaCha8Rng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn shuffle_boats_keeps_race_membership() {
    let s = shape(6, 3, 2);
    let original = build_schedule(s, &[&[&[0, 1, 2], &[3, 4, 5]], &[&[0, 3, 4], &[1, 2, 5]]]);
    let shuffled = shuffle_boats(&original, &mut ChaCha8Rng::seed_from_u64(9));

    assert_eq!(shuffled.match_matrix(), original.match_matrix());
    assert!(shuffled.base().is_none());
    for (a, b) in shuffled.flights().iter().zip(original.flights()) {
        for (ra, rb) in a.races().iter().zip(b.races()) {
            let mut teams = ra.teams().to_vec();
            teams.sort_unstable();
            assert_eq!(teams, rb.teams());
        }
    }
}

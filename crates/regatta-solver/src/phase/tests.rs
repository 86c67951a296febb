use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use regatta_config::{BoatScheduleConfig, MatchMatrixConfig};
use regatta_core::{RegattaError, Result, Schedule};
use regatta_scoring::CostFunction;
use regatta_test::{assert_schedule_invariants, build_schedule, shape};

use super::*;
use crate::event::{Checkpoint, PhaseKind};
use crate::scope::SolverScope;
use crate::stats::PhaseStats;

fn match_config(loops: usize) -> MatchMatrixConfig {
    MatchMatrixConfig {
        loops,
        individuals: 10,
        show_every_n: Some(1),
        ..MatchMatrixConfig::default()
    }
}

fn boat_config(loops: usize) -> BoatScheduleConfig {
    BoatScheduleConfig {
        loops,
        individuals: 10,
        show_every_n: Some(5),
        ..BoatScheduleConfig::default()
    }
}

#[test]
fn phase_one_builds_valid_schedules() {
    let s = shape(7, 3, 4);
    let phase = MatchMatrixPhase::new(match_config(50));
    let schedule = phase.solve(&mut SolverScope::new(42), s, &mut ()).unwrap();

    assert_eq!(schedule.len(), 4);
    assert_schedule_invariants(&s, &schedule);
}

#[test]
fn phase_one_is_deterministic() {
    let s = shape(8, 2, 4);
    let phase = MatchMatrixPhase::new(match_config(30));
    let a = phase.solve(&mut SolverScope::new(42), s, &mut ()).unwrap();
    let b = phase.solve(&mut SolverScope::new(42), s, &mut ()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn single_flight_needs_no_search() {
    let s = shape(6, 2, 1);
    let mut checkpoints = 0;
    let mut listener = |_: &Checkpoint| -> Result<()> {
        checkpoints += 1;
        Ok(())
    };
    let schedule = MatchMatrixPhase::new(match_config(50))
        .solve(&mut SolverScope::new(1), s, &mut listener)
        .unwrap();

    assert_eq!(schedule.len(), 1);
    assert_eq!(checkpoints, 0);
}

#[test]
fn early_stopping_ends_search_within_two_checkpoints() {
    let s = shape(6, 2, 2);
    let config = match_config(100).with_early_stopping(1).with_show_every_n(1);
    let mut checkpoints = 0;
    let mut listener = |_: &Checkpoint| -> Result<()> {
        checkpoints += 1;
        Ok(())
    };
    MatchMatrixPhase::new(config)
        .solve(&mut SolverScope::new(42), s, &mut listener)
        .unwrap();
    assert!(checkpoints <= 2, "{checkpoints} checkpoints");

    let mut checkpoints = 0;
    let mut listener = |_: &Checkpoint| -> Result<()> {
        checkpoints += 1;
        Ok(())
    };
    MatchMatrixPhase::new(match_config(100))
        .solve(&mut SolverScope::new(42), s, &mut listener)
        .unwrap();
    assert_eq!(checkpoints, 100);
}

#[test]
fn checkpoints_follow_cadence() {
    let s = shape(6, 2, 2);
    let config = MatchMatrixConfig {
        show_every_n: Some(10),
        ..match_config(25)
    };
    let mut iterations = Vec::new();
    let mut listener = |c: &Checkpoint| -> Result<()> {
        iterations.push(c.iteration);
        Ok(())
    };
    MatchMatrixPhase::new(config)
        .solve(&mut SolverScope::new(3), s, &mut listener)
        .unwrap();
    assert_eq!(iterations, vec![0, 10, 20, 24]);
}

#[test]
fn tied_completions_all_become_branches() {
    let s = shape(4, 2, 2);
    let base = Arc::new(build_schedule(s, &[&[&[0, 1], &[2, 3]]]));
    let mut stats = PhaseStats::new(PhaseKind::MatchMatrix);

    // {0,2}{1,3} and {0,3}{1,2} score the same; repeating {0,1}{2,3} is worse
    let wide = MatchMatrixPhase::new(match_config(30).with_max_branches(10));
    let branches = wide
        .next_branches(&mut SolverScope::new(42), &[base.clone()], 1, &mut (), &mut stats)
        .unwrap();
    assert_eq!(branches.len(), 2);
    assert!(regatta_core::scores_tied(branches[0].score, branches[1].score));
    assert_ne!(branches[0].schedule, branches[1].schedule);

    let narrow = MatchMatrixPhase::new(match_config(30));
    let branches = narrow
        .next_branches(&mut SolverScope::new(42), &[base], 1, &mut (), &mut stats)
        .unwrap();
    assert_eq!(branches.len(), 1);
}

#[test]
fn phase_one_reduces_repeated_meetings() {
    let s = shape(4, 2, 3);
    let phase = MatchMatrixPhase::new(match_config(30));
    let schedule = phase.solve(&mut SolverScope::new(42), s, &mut ()).unwrap();

    // three flights of four teams on two boats can pair everyone exactly once
    let matrix = schedule.match_matrix();
    for a in 0..4u8 {
        for b in 0..a {
            assert_eq!(matrix.count(a, b), 1);
        }
    }
}

#[test]
fn terminate_flag_cancels_phase() {
    let flag = Arc::new(AtomicBool::new(true));
    let mut scope = SolverScope::new(1).with_terminate_early_flag(flag);
    let err = MatchMatrixPhase::new(match_config(10))
        .solve(&mut scope, shape(6, 2, 3), &mut ())
        .unwrap_err();
    assert!(err.is_cancelled());
}

#[test]
fn listener_error_aborts_phase() {
    let mut listener =
        |_: &Checkpoint| -> Result<()> { Err(RegattaError::InvalidState("observer gone".into())) };
    let err = BoatSchedulePhase::new(boat_config(10))
        .solve(&mut SolverScope::new(1), fixed_schedule(), &mut listener)
        .unwrap_err();
    assert!(matches!(err, RegattaError::InvalidState(_)));
}

fn fixed_schedule() -> Schedule {
    build_schedule(
        shape(6, 2, 3),
        &[
            &[&[0, 1], &[2, 3], &[4, 5]],
            &[&[0, 2], &[1, 4], &[3, 5]],
            &[&[0, 3], &[1, 5], &[2, 4]],
        ],
    )
}

#[test]
fn phase_two_keeps_pairings() {
    let input = fixed_schedule();
    let phase = BoatSchedulePhase::new(boat_config(100));
    let output = phase
        .solve(&mut SolverScope::new(42), input.clone(), &mut ())
        .unwrap();

    assert_schedule_invariants(input.shape(), &output);
    assert_eq!(output.match_matrix(), input.match_matrix());
    for (a, b) in output.flights().iter().zip(input.flights()) {
        let mut races: Vec<Vec<u8>> = a
            .races()
            .iter()
            .map(|r| {
                let mut teams = r.teams().to_vec();
                teams.sort_unstable();
                teams
            })
            .collect();
        races.sort();
        let expected: Vec<Vec<u8>> = b.races().iter().map(|r| r.teams().to_vec()).collect();
        assert_eq!(races, expected);
    }
}

#[test]
fn phase_two_is_deterministic() {
    let phase = BoatSchedulePhase::new(boat_config(50));
    let a = phase
        .solve(&mut SolverScope::new(9), fixed_schedule(), &mut ())
        .unwrap();
    let b = phase
        .solve(&mut SolverScope::new(9), fixed_schedule(), &mut ())
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(phase.cost().score(&a), phase.cost().score(&b));
}

#[test]
fn disabled_phase_two_returns_input() {
    let input = fixed_schedule();
    let phase = BoatSchedulePhase::new(boat_config(0));
    assert!(!phase.is_enabled());

    let mut phases = Vec::new();
    struct Recorder<'a>(&'a mut Vec<PhaseKind>);
    impl crate::event::ProgressListener for Recorder<'_> {
        fn on_checkpoint(&mut self, _: &Checkpoint) -> Result<()> {
            Ok(())
        }
        fn on_phase_start(&mut self, phase: PhaseKind) {
            self.0.push(phase);
        }
    }
    let output = phase
        .solve(&mut SolverScope::new(1), input.clone(), &mut Recorder(&mut phases))
        .unwrap();
    assert_eq!(output, input);
    assert!(phases.is_empty());
}

#[test]
fn empty_population_is_a_config_error() {
    let config = MatchMatrixConfig {
        individuals: 0,
        ..match_config(10)
    };
    let err = MatchMatrixPhase::new(config)
        .solve(&mut SolverScope::new(1), shape(6, 2, 2), &mut ())
        .unwrap_err();
    assert!(matches!(err, RegattaError::Config(_)));
}

#[test]
fn phase_two_early_stopping_bounds_checkpoints() {
    let config = BoatScheduleConfig {
        early_stopping: Some(2),
        show_every_n: Some(1),
        ..boat_config(200)
    };
    let mut ages = Vec::new();
    let mut listener = |c: &Checkpoint| -> Result<()> {
        ages.push(c.best_age);
        Ok(())
    };
    BoatSchedulePhase::new(config)
        .solve(&mut SolverScope::new(42), fixed_schedule(), &mut listener)
        .unwrap();

    // the search ends at the first checkpoint whose best is two checkpoints
    // old, or earlier on convergence
    assert!(ages.len() < 200, "{} checkpoints", ages.len());
    let (_, before_last) = ages.split_last().unwrap();
    assert!(before_last.iter().all(|&age| age < 2), "{ages:?}");
}

#[test]
fn single_member_population_converges_at_once() {
    let config = BoatScheduleConfig {
        individuals: 1,
        ..boat_config(200)
    };
    let mut iterations = Vec::new();
    let mut listener = |c: &Checkpoint| -> Result<()> {
        iterations.push(c.iteration);
        Ok(())
    };
    BoatSchedulePhase::new(config)
        .solve(&mut SolverScope::new(42), fixed_schedule(), &mut listener)
        .unwrap();
    assert_eq!(iterations, vec![0]);
}

#[test]
fn phase_two_lowers_boat_cost() {
    let input = fixed_schedule();
    let phase = BoatSchedulePhase::new(boat_config(200));
    let output = phase
        .solve(&mut SolverScope::new(42), input.clone(), &mut ())
        .unwrap();
    assert!(
        phase.cost().score(&output) <= phase.cost().score(&input),
        "{} > {}",
        phase.cost().score(&output),
        phase.cost().score(&input)
    );
}

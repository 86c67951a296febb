//! Regatta Solver Engine
//!
//! This crate builds pairing lists in two phases:
//! - Phase 1 ([`phase::MatchMatrixPhase`]) grows the schedule flight by flight,
//!   keeping a bounded set of equally fair branches
//! - Phase 2 ([`phase::BoatSchedulePhase`]) reorders boats and races of the
//!   finished schedule to cut shuttle trips and boat changes
//!
//! Both phases are population-based local searches driven by the mutation
//! operators in [`heuristic`]. A run is single threaded and reproducible from
//! its seed; [`manager::SolverManager`] runs several of them concurrently.

pub mod event;
pub mod heuristic;
pub mod manager;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod termination;

pub use event::{Checkpoint, EventForwarder, PhaseKind, ProgressListener, SolverEvent};
pub use heuristic::{
    random_flight, shuffle_boats, shuffle_teams, swap_between_races, swap_boats, swap_races,
};
pub use manager::{ManagerError, SolverManager};
pub use phase::{BoatSchedulePhase, Individual, MatchMatrixPhase, Population};
pub use scope::SolverScope;
pub use solver::{OptimizationResult, Optimizer};
pub use stats::{PhaseStats, ScheduleStatistics, SolverStats};
pub use termination::{CheckpointCadence, EarlyStopping};

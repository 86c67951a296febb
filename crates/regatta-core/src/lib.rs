//! Regatta Core - Schedule model for the pairing-list optimizer
//!
//! This crate provides the fundamental types of a regatta schedule:
//! - Team indices, races, flights and the schedule itself
//! - Incrementally maintained match and boat matrices
//! - The schedule shape (teams, boats, flights, phantom padding)
//! - Score tags and the per-schedule score cache
//! - The crate-wide error type

pub mod domain;
pub mod error;
pub mod score;

pub use domain::{
    BoatMatrix, Flight, MatchMatrix, Race, Schedule, ScheduleShape, TeamId, MAX_TEAMS,
};
pub use error::{RegattaError, Result};
pub use score::{scores_tied, CostKind, ScoreCache, SCORE_EPSILON};

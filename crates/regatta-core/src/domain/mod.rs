//! Domain model for regatta schedules.
//!
//! A [`Schedule`] is an ordered sequence of [`Flight`]s, each a list of
//! [`Race`]s assigning teams to boat slots. Team counts that do not divide
//! evenly by the boat count are padded with phantom team indices so every
//! race is full.

mod boat_matrix;
mod flight;
mod match_matrix;
mod race;
mod schedule;
mod shape;


pub use boat_matrix::BoatMatrix;
pub use flight::Flight;
pub use match_matrix::MatchMatrix;
pub use race::Race;
pub use schedule::Schedule;
pub use shape::{ScheduleShape, MAX_TEAMS};

/// Index of a team (0..num_teams), or a phantom slot (>= num_teams).
pub type TeamId = u8;

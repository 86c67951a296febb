//! Regatta - fair pairing lists for sailing leagues
//!
//! A league regatta sails many short races on a few shared boats. This crate
//! builds the pairing list: which teams meet in which race, and which boat each
//! team sails, so that every pair of teams meets about equally often while as
//! few teams as possible need a shuttle or change boats between flights.
//!
//! # Example
//!
//! ```rust
//! use regatta::prelude::*;
//!
//! let schedule = ScheduleConfig::new(
//!     (1..=6).map(|i| format!("Team {i}")).collect(),
//!     2,
//!     3,
//! );
//! let config = OptimizationConfig::new().with_loops(50).with_individuals(10);
//!
//! let result = Optimizer::from_config(&schedule, config).unwrap().solve().unwrap();
//! let list = PairingList::from_schedule(&result.schedule);
//! assert_eq!(list.flights.len(), 3);
//! ```

// Schedule model
pub use regatta_core::{
    BoatMatrix, Flight, MatchMatrix, Race, RegattaError, Result, Schedule, ScheduleShape, TeamId,
};

// Configuration
pub use regatta_config::{
    BoatConfig, BoatScheduleConfig, ConfigError, ManagerConfig, MatchMatrixConfig,
    OptimizationConfig, ScheduleConfig,
};

// Cost functions
pub use regatta_scoring::{BoatScheduleCost, CostFunction, InterFlightStat, MatchMatrixCost};

// Optimizer
pub use regatta_solver::{
    Checkpoint, ManagerError, OptimizationResult, Optimizer, PhaseKind, ProgressListener,
    ScheduleStatistics, SolverEvent, SolverManager,
};

pub mod export;
pub use export::{team_names, to_csv, write_csv_file, PairingList, PairingListError};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{
        BoatScheduleConfig, MatchMatrixConfig, OptimizationConfig, ScheduleConfig,
    };
    pub use super::{Flight, Race, Schedule, ScheduleShape, TeamId};
    pub use super::{OptimizationResult, Optimizer, ProgressListener, ScheduleStatistics};
    pub use super::{to_csv, PairingList};
}

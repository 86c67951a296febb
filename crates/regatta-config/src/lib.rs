//! Configuration system for the regatta optimizer.
//!
//! A run is described by two documents: the [`ScheduleConfig`] (teams, boats,
//! number of flights) and the [`OptimizationConfig`] (seed plus one tuning
//! block per phase). Both load from TOML or YAML.
//!
//! # Examples
//!
//! ```
//! use regatta_config::{OptimizationConfig, ScheduleConfig};
//!
//! let schedule = ScheduleConfig::from_yaml_str(r##"
//!     flights: 3
//!     teams: [Kiel, Berlin, Hamburg, Munich, Cologne, Bremen]
//!     boats:
//!       - { name: Red, color: "#ff0000" }
//!       - { name: Blue, color: "#0000ff" }
//! "##).unwrap();
//! let shape = schedule.shape().unwrap();
//! assert_eq!(shape.races_per_flight(), 3);
//! assert_eq!(schedule.boats[1].color, "#0000ff");
//!
//! let optimization = OptimizationConfig::from_toml_str(r#"
//!     seed = 7
//!
//!     [match_matrix]
//!     loops = 500
//!     early_stopping = 3
//!
//!     [boat_schedule]
//!     weight_stay_on_boat = 2.0
//! "#).unwrap();
//! assert_eq!(optimization.seed, 7);
//! assert_eq!(optimization.match_matrix.individuals, 100);
//! assert_eq!(optimization.boat_schedule.weight_stay_on_boat, 2.0);
//! ```

use std::collections::HashSet;
use std::path::Path;

use regatta_core::{RegattaError, ScheduleShape, TeamId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for RegattaError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Invalid(msg) => RegattaError::Config(msg),
            other => RegattaError::Config(other.to_string()),
        }
    }
}

macro_rules! impl_loaders {
    ($ty:ty) => {
        impl $ty {
            /// Loads configuration from a file, choosing YAML for `.yaml`/`.yml`
            /// and TOML otherwise.
            ///
            /// # Errors
            ///
            /// Returns error if the file cannot be read or parsed.
            pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
                let path = path.as_ref();
                match path.extension().and_then(|e| e.to_str()) {
                    Some("yaml" | "yml") => Self::from_yaml_file(path),
                    _ => Self::from_toml_file(path),
                }
            }

            /// Loads configuration from a TOML file.
            pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
                let contents = std::fs::read_to_string(path)?;
                Self::from_toml_str(&contents)
            }

            /// Parses configuration from a TOML string.
            pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
                Ok(toml::from_str(s)?)
            }

            /// Loads configuration from a YAML file.
            pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
                let contents = std::fs::read_to_string(path)?;
                Self::from_yaml_str(&contents)
            }

            /// Parses configuration from a YAML string.
            pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
                Ok(serde_yaml::from_str(s)?)
            }
        }
    };
}

impl_loaders!(ScheduleConfig);
impl_loaders!(OptimizationConfig);
impl_loaders!(ManagerConfig);

/// A boat of the fleet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BoatConfig {
    /// Display name.
    pub name: String,

    /// Display color, e.g. `#ff0000`.
    #[serde(default)]
    pub color: String,
}

impl BoatConfig {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Teams, boats and the number of flights to schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleConfig {
    /// Free-form title lines of the event.
    #[serde(default)]
    pub titles: Vec<String>,

    /// Number of flights.
    pub flights: usize,

    /// Team names; position is the team index.
    pub teams: Vec<String>,

    /// Boats; position is the boat slot.
    pub boats: Vec<BoatConfig>,
}

impl ScheduleConfig {
    /// Creates a configuration with generated boat names.
    pub fn new(teams: Vec<String>, num_boats: usize, flights: usize) -> Self {
        Self {
            titles: Vec::new(),
            flights,
            teams,
            boats: (1..=num_boats)
                .map(|i| BoatConfig::new(format!("Boat {i}"), ""))
                .collect(),
        }
    }

    /// Adds a title line.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.titles.push(title.into());
        self
    }

    /// Checks the configuration for errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for zero teams, boats or flights, more
    /// than 127 teams, more boats than teams, or duplicate team names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::with_capacity(self.teams.len());
        if let Some(dup) = self.teams.iter().find(|t| !seen.insert(t.as_str())) {
            return Err(ConfigError::Invalid(format!("duplicate team name `{dup}`")));
        }
        ScheduleShape::new(self.teams.len(), self.boats.len(), self.flights)
            .map(|_| ())
            .map_err(invalid)
    }

    /// Validates and returns the schedule dimensions.
    pub fn shape(&self) -> Result<ScheduleShape, ConfigError> {
        self.validate()?;
        ScheduleShape::new(self.teams.len(), self.boats.len(), self.flights).map_err(invalid)
    }

    /// Name of a team slot; phantom slots have an empty name.
    pub fn team_name(&self, team: TeamId) -> &str {
        self.teams
            .get(usize::from(team))
            .map(String::as_str)
            .unwrap_or("")
    }
}

fn invalid(err: RegattaError) -> ConfigError {
    match err {
        RegattaError::Config(msg) => ConfigError::Invalid(msg),
        other => ConfigError::Invalid(other.to_string()),
    }
}

/// Tuning of the whole optimization run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct OptimizationConfig {
    /// Random seed; equal seeds give equal schedules.
    pub seed: u64,

    /// Phase 1: pairings.
    pub match_matrix: MatchMatrixConfig,

    /// Phase 2: boats and race order.
    pub boat_schedule: BoatScheduleConfig,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            match_matrix: MatchMatrixConfig::default(),
            boat_schedule: BoatScheduleConfig::default(),
        }
    }
}

impl OptimizationConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the loop count of both phases.
    pub fn with_loops(mut self, loops: usize) -> Self {
        self.match_matrix.loops = loops;
        self.boat_schedule.loops = loops;
        self
    }

    /// Sets the population size of both phases.
    pub fn with_individuals(mut self, individuals: usize) -> Self {
        self.match_matrix.individuals = individuals;
        self.boat_schedule.individuals = individuals;
        self
    }

    /// Replaces the phase 1 block.
    pub fn with_match_matrix(mut self, config: MatchMatrixConfig) -> Self {
        self.match_matrix = config;
        self
    }

    /// Replaces the phase 2 block.
    pub fn with_boat_schedule(mut self, config: BoatScheduleConfig) -> Self {
        self.boat_schedule = config;
        self
    }

    /// Checks both phase blocks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.match_matrix.validate()?;
        self.boat_schedule.validate()
    }
}

/// Phase 1 tuning: beam search over flights scored by pairing fairness.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct MatchMatrixConfig {
    /// Iterations per flight and branch.
    pub loops: usize,

    /// Population size.
    pub individuals: usize,

    /// Checkpoints without improvement before stopping; `None` disables.
    pub early_stopping: Option<u32>,

    /// Iterations between checkpoints; `None` checks only after the last loop.
    pub show_every_n: Option<u32>,

    /// Mutations generated per iteration.
    pub swap_teams: usize,

    /// Maximum number of tied partial schedules carried to the next flight.
    pub max_branches: usize,

    /// Weight of uneven phantom encounters.
    pub factor_less_participants: f64,

    /// Weight of uneven phantom spread within the last flight.
    pub factor_team_missing: f64,
}

impl Default for MatchMatrixConfig {
    fn default() -> Self {
        Self {
            loops: 10_000,
            individuals: 100,
            early_stopping: None,
            show_every_n: Some(1_000),
            swap_teams: 2,
            max_branches: 1,
            factor_less_participants: 3.01,
            factor_team_missing: 20.01,
        }
    }
}

impl MatchMatrixConfig {
    /// Sets the early stopping threshold.
    pub fn with_early_stopping(mut self, checkpoints: u32) -> Self {
        self.early_stopping = Some(checkpoints);
        self
    }

    /// Sets the checkpoint interval.
    pub fn with_show_every_n(mut self, iterations: u32) -> Self {
        self.show_every_n = Some(iterations);
        self
    }

    /// Sets the branch cap.
    pub fn with_max_branches(mut self, max_branches: usize) -> Self {
        self.max_branches = max_branches;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.individuals == 0 {
            return Err(ConfigError::Invalid(
                "match_matrix.individuals must be positive".into(),
            ));
        }
        if self.max_branches == 0 {
            return Err(ConfigError::Invalid(
                "match_matrix.max_branches must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Phase 2 tuning: boat slots and race order scored by transition fairness.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct BoatScheduleConfig {
    /// Iterations; zero skips the phase.
    pub loops: usize,

    /// Population size.
    pub individuals: usize,

    /// Checkpoints without improvement before stopping; `None` disables.
    pub early_stopping: Option<u32>,

    /// Iterations between checkpoints; `None` checks only after the last loop.
    pub show_every_n: Option<u32>,

    /// Boat swaps generated per iteration.
    pub swap_boats: usize,

    /// Race order swaps generated per iteration.
    pub swap_races: usize,

    /// Weight of shuttle trips between flights.
    pub weight_stay_on_boat: f64,

    /// Weight of shuttle trips at sea.
    pub weight_stay_on_shuttle: f64,

    /// Weight of teams switching boats between flights.
    pub weight_change_between_boats: f64,
}

impl Default for BoatScheduleConfig {
    fn default() -> Self {
        Self {
            loops: 10_000,
            individuals: 100,
            early_stopping: None,
            show_every_n: Some(1_000),
            swap_boats: 2,
            swap_races: 2,
            weight_stay_on_boat: 1.0,
            weight_stay_on_shuttle: 1.0,
            weight_change_between_boats: 1.0,
        }
    }
}

impl BoatScheduleConfig {
    /// Sets the early stopping threshold.
    pub fn with_early_stopping(mut self, checkpoints: u32) -> Self {
        self.early_stopping = Some(checkpoints);
        self
    }

    /// Sets the checkpoint interval.
    pub fn with_show_every_n(mut self, iterations: u32) -> Self {
        self.show_every_n = Some(iterations);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loops > 0 && self.individuals == 0 {
            return Err(ConfigError::Invalid(
                "boat_schedule.individuals must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Worker pool settings for concurrent runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ManagerConfig {
    /// Runs executed concurrently.
    pub worker_count: usize,

    /// Runs waiting for a worker before submissions are rejected.
    pub queue_capacity: usize,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            worker_count: 2,
            queue_capacity: 10,
        }
    }
}

impl ManagerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 {
            return Err(ConfigError::Invalid("worker_count must be positive".into()));
        }
        Ok(())
    }
}

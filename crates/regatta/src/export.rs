//! Pairing-list documents.
//!
//! A finished schedule is saved as a YAML [`PairingList`] for later
//! inspection, and as a semicolon separated table for spreadsheets and
//! scoreboards.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use regatta_config::ScheduleConfig;
use regatta_core::{Flight, Race, RegattaError, Schedule, ScheduleShape};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors reading or writing a pairing list.
#[derive(Debug, Error)]
pub enum PairingListError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Schedule(#[from] RegattaError),
}

/// Serialized form of a schedule: flights of races of team indices.
///
/// Team indices are 0-based; indices at or above the number of teams are
/// phantom slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingList {
    pub flights: Vec<Flight>,
}

impl PairingList {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            flights: schedule.to_flights(),
        }
    }

    /// Rebuilds and validates the schedule for `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`RegattaError::InvalidSchedule`] if the flights do not fit
    /// `shape`.
    pub fn into_schedule(self, shape: ScheduleShape) -> Result<Schedule, RegattaError> {
        Schedule::from_flights(shape, self.flights)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, PairingListError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, PairingListError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn to_yaml_string(&self) -> Result<String, PairingListError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn write_yaml_file(&self, path: impl AsRef<Path>) -> Result<(), PairingListError> {
        let path = path.as_ref();
        fs::write(path, self.to_yaml_string()?)?;
        debug!(event = "pairing_list_written", path = %path.display(), format = "yaml");
        Ok(())
    }
}

/// Renders `schedule` as a semicolon separated table.
///
/// One line per race with its running number, the 1-based flight number and
/// the 1-based team number in each boat slot. Every field of a race line is
/// followed by `;`.
///
/// # Example
///
/// ```
/// use regatta::{to_csv, Flight, Race, Schedule, ScheduleShape};
///
/// let shape = ScheduleShape::new(4, 2, 1).unwrap();
/// let schedule = Schedule::new(
///     shape,
///     Flight::new(vec![Race::new([0, 3]), Race::new([1, 2])]),
/// );
///
/// assert_eq!(to_csv(&schedule), "Race;Flight;Boat 1;Boat 2\n1;1;1;4;\n2;1;2;3;\n");
/// ```
pub fn to_csv(schedule: &Schedule) -> String {
    let mut out = String::from("Race;Flight");
    for boat in 1..=schedule.shape().num_boats() {
        let _ = write!(out, ";Boat {boat}");
    }
    out.push('\n');

    let mut number = 0;
    for (flight_index, flight) in schedule.flights().iter().enumerate() {
        for race in flight.races() {
            number += 1;
            let _ = write!(out, "{number};{};", flight_index + 1);
            for &team in race.teams() {
                let _ = write!(out, "{};", u16::from(team) + 1);
            }
            out.push('\n');
        }
    }
    out
}

/// Writes [`to_csv`] output to `path`.
pub fn write_csv_file(schedule: &Schedule, path: impl AsRef<Path>) -> Result<(), PairingListError> {
    let path = path.as_ref();
    fs::write(path, to_csv(schedule))?;
    debug!(event = "pairing_list_written", path = %path.display(), format = "csv");
    Ok(())
}

/// Names of the teams in `race`, one per boat slot.
///
/// Phantom slots render as empty names.
pub fn team_names<'a>(config: &'a ScheduleConfig, race: &Race) -> Vec<&'a str> {
    race.teams().iter().map(|&team| config.team_name(team)).collect()
}

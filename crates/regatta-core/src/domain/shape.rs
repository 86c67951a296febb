//! Schedule dimensions.

use crate::error::{RegattaError, Result};

/// Maximum number of real teams.
///
/// Team slots are stored in a byte that must stay within the signed range.
pub const MAX_TEAMS: usize = i8::MAX as usize;

/// The immutable dimensions of a schedule.
///
/// # Example
///
/// ```
/// use regatta_core::ScheduleShape;
///
/// let shape = ScheduleShape::new(7, 2, 5).unwrap();
/// assert_eq!(shape.races_per_flight(), 4);
/// assert_eq!(shape.padded_teams(), 8);
/// assert!(!shape.is_full());
/// assert!(shape.is_phantom(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleShape {
    num_teams: usize,
    num_boats: usize,
    flights: usize,
}

impl ScheduleShape {
    /// Creates a validated schedule shape.
    ///
    /// # Errors
    ///
    /// Returns [`RegattaError::Config`] for zero teams, boats or flights, for
    /// more than [`MAX_TEAMS`] teams, or for more boats than teams.
    pub fn new(num_teams: usize, num_boats: usize, flights: usize) -> Result<Self> {
        if num_teams == 0 {
            return Err(RegattaError::Config("at least one team is required".into()));
        }
        if num_boats == 0 {
            return Err(RegattaError::Config("at least one boat is required".into()));
        }
        if flights == 0 {
            return Err(RegattaError::Config("at least one flight is required".into()));
        }
        if num_teams > MAX_TEAMS {
            return Err(RegattaError::Config(format!(
                "{num_teams} teams exceed the supported maximum of {MAX_TEAMS}"
            )));
        }
        if num_boats > num_teams {
            return Err(RegattaError::Config(format!(
                "{num_boats} boats for only {num_teams} teams"
            )));
        }
        Ok(Self {
            num_teams,
            num_boats,
            flights,
        })
    }

    /// Number of real teams.
    pub fn num_teams(&self) -> usize {
        self.num_teams
    }

    /// Number of boats, which is also the size of every race.
    pub fn num_boats(&self) -> usize {
        self.num_boats
    }

    /// Number of flights of a complete schedule.
    pub fn flights(&self) -> usize {
        self.flights
    }

    /// Races per flight: `ceil(num_teams / num_boats)`.
    pub fn races_per_flight(&self) -> usize {
        self.num_teams.div_ceil(self.num_boats)
    }

    /// Team slots per flight including phantom padding.
    pub fn padded_teams(&self) -> usize {
        self.races_per_flight() * self.num_boats
    }

    /// Returns true if no phantom padding is needed.
    pub fn is_full(&self) -> bool {
        self.padded_teams() == self.num_teams
    }

    /// Returns true if `team` is a phantom slot.
    pub fn is_phantom(&self, team: super::TeamId) -> bool {
        usize::from(team) >= self.num_teams
    }

    /// All team slot indices of one flight, real teams first.
    pub fn team_slots(&self) -> Vec<super::TeamId> {
        (0..self.padded_teams())
            .map(|t| t as super::TeamId)
            .collect()
    }
}

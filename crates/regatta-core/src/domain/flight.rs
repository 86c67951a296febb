//! A flight: one round of simultaneous races.

use super::{Race, TeamId};

/// An ordered list of races sailed in one round.
///
/// Race order matters for transitions between flights: the last race of a
/// flight and the first race of the next one share the harbour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flight {
    races: Vec<Race>,
}

impl Flight {
    /// Creates a flight from its races in sailing order.
    pub fn new(races: Vec<Race>) -> Self {
        Self { races }
    }

    /// Races in sailing order.
    pub fn races(&self) -> &[Race] {
        &self.races
    }

    /// Mutable access to the races.
    pub fn races_mut(&mut self) -> &mut [Race] {
        &mut self.races
    }

    /// Number of races.
    pub fn len(&self) -> usize {
        self.races.len()
    }

    /// Returns true if the flight has no races.
    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }

    /// The race at `index`.
    pub fn race(&self, index: usize) -> &Race {
        &self.races[index]
    }

    /// The first race sailed.
    pub fn first_race(&self) -> Option<&Race> {
        self.races.first()
    }

    /// The last race sailed.
    pub fn last_race(&self) -> Option<&Race> {
        self.races.last()
    }

    /// Exchanges the sailing order of two races.
    pub fn swap_races(&mut self, a: usize, b: usize) {
        self.races.swap(a, b);
    }

    /// Puts the flight in canonical form.
    ///
    /// Teams are sorted within each race and races are ordered by their first
    /// team, so that flights with the same pairings compare equal.
    pub fn canonicalize(&mut self) {
        for race in &mut self.races {
            race.sort();
        }
        self.races.sort_by_key(|race| race.first_team());
    }

    /// Iterates over every team slot of every race.
    pub fn team_slots(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.races.iter().flat_map(|race| race.teams().iter().copied())
    }
}

impl FromIterator<Race> for Flight {
    fn from_iter<I: IntoIterator<Item = Race>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! A single race: team indices by boat slot.

use smallvec::SmallVec;

use super::TeamId;

/// Inline capacity for the teams of a race; larger fleets spill to the heap.
type RaceSlots = SmallVec<[TeamId; 8]>;

/// One race of a flight.
///
/// Position in the team list is the boat slot. Equality is structural and
/// order-sensitive, so `[0, 1]` and `[1, 0]` are different races.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Race {
    teams: RaceSlots,
}

impl Race {
    /// Creates a race from teams ordered by boat slot.
    pub fn new(teams: impl IntoIterator<Item = TeamId>) -> Self {
        Self {
            teams: teams.into_iter().collect(),
        }
    }

    /// Teams ordered by boat slot.
    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    /// Mutable access to the boat slots.
    pub fn teams_mut(&mut self) -> &mut [TeamId] {
        &mut self.teams
    }

    /// Number of boat slots.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Returns true if the race has no slots.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Team in the lowest boat slot.
    pub fn first_team(&self) -> Option<TeamId> {
        self.teams.first().copied()
    }

    /// Returns true if the race contains `team` in any slot.
    pub fn contains(&self, team: TeamId) -> bool {
        self.teams.contains(&team)
    }

    /// Returns true if any slot holds a phantom index.
    pub fn has_phantom(&self, num_teams: usize) -> bool {
        self.teams.iter().any(|&t| usize::from(t) >= num_teams)
    }

    /// Number of slots holding a phantom index.
    pub fn phantom_count(&self, num_teams: usize) -> usize {
        self.teams
            .iter()
            .filter(|&&t| usize::from(t) >= num_teams)
            .count()
    }

    /// Number of real teams taking part.
    pub fn participants(&self, num_teams: usize) -> usize {
        self.len() - self.phantom_count(num_teams)
    }

    /// Sorts the slots ascending by team index.
    pub fn sort(&mut self) {
        self.teams.sort_unstable();
    }

    /// Exchanges the teams of two boat slots.
    pub fn swap_slots(&mut self, a: usize, b: usize) {
        self.teams.swap(a, b);
    }
}

impl From<Vec<TeamId>> for Race {
    fn from(teams: Vec<TeamId>) -> Self {
        Self::new(teams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_order_sensitive() {
        assert_eq!(Race::new([0, 1]), Race::new([0, 1]));
        assert_ne!(Race::new([0, 1]), Race::new([1, 0]));
    }

    #[test]
    fn phantom_counting() {
        let race = Race::new([2, 7, 0, 6]);
        assert!(race.has_phantom(6));
        assert_eq!(race.phantom_count(6), 2);
        assert_eq!(race.participants(6), 2);
        assert!(!race.has_phantom(8));
    }

    #[test]
    fn sort_and_swap() {
        let mut race = Race::new([3, 1, 2]);
        race.sort();
        assert_eq!(race.teams(), &[1, 2, 3]);
        race.swap_slots(0, 2);
        assert_eq!(race.teams(), &[3, 2, 1]);
        assert_eq!(race.first_team(), Some(3));
    }
}

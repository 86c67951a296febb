//! Transitions between consecutive flights.
//!
//! After a flight, the teams of its last race come ashore while the first race
//! of the next flight goes out. A team sailing both races can stay on its boat
//! if it keeps the same slot; everyone else needs a shuttle.

use regatta_core::{Flight, Race, TeamId};

/// Shuttle trips needed to move `teams` teams; a shuttle carries two.
#[inline]
pub fn shuttles_for(teams: usize) -> usize {
    teams.div_ceil(2)
}

/// What happens between flight `before` and flight `after`.
///
/// Phantom slots are not teams and never count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterFlightStat {
    /// Teams sailing the last race of `before` and the first race of `after`
    /// in the same boat slot.
    pub stay_on_boat: Vec<TeamId>,
    /// Teams sailing both boundary races but in different boat slots.
    pub change_boats: Vec<TeamId>,
    /// Teams of the second-to-last race of `before` that also sail the first
    /// race of `after`.
    pub at_sea_last_race: Vec<TeamId>,
    /// Teams of the last race of `before` that also sail the second race of
    /// `after`.
    pub at_sea_first_race: Vec<TeamId>,
    /// Teams to transfer between the boundary races.
    pub shuttle_between_flights: usize,
    /// Teams to transfer between the second-to-last race of `before` and the
    /// first race of `after`.
    pub shuttle_last_race: usize,
    /// Teams to transfer between the last race of `before` and the second race
    /// of `after`.
    pub shuttle_first_race: usize,
}

impl InterFlightStat {
    /// Analyzes the transition from `before` to `after`.
    ///
    /// # Example
    ///
    /// ```
    /// use regatta_core::{Flight, Race};
    /// use regatta_scoring::InterFlightStat;
    ///
    /// let before = Flight::new(vec![Race::new([0, 1]), Race::new([2, 3])]);
    /// let after = Flight::new(vec![Race::new([2, 0]), Race::new([1, 3])]);
    ///
    /// let stat = InterFlightStat::between(&before, &after, 4);
    /// assert_eq!(stat.stay_on_boat, vec![2]);
    /// assert!(stat.change_boats.is_empty());
    /// assert_eq!(stat.shuttle_between_flights, 1);
    /// ```
    pub fn between(before: &Flight, after: &Flight, num_teams: usize) -> Self {
        let mut stat = Self::default();
        let (Some(last), Some(first)) = (before.last_race(), after.first_race()) else {
            return stat;
        };

        let mut transfer = last.participants(num_teams).max(first.participants(num_teams));
        for (slot, &team) in real_teams(last, num_teams) {
            match first.teams().iter().position(|&t| t == team) {
                Some(other) if other == slot => {
                    stat.stay_on_boat.push(team);
                    transfer -= 1;
                }
                Some(_) => stat.change_boats.push(team),
                None => {}
            }
        }
        stat.shuttle_between_flights = transfer;

        if before.len() > 1 && after.len() > 1 {
            let second_last = before.race(before.len() - 2);
            stat.shuttle_last_race =
                shared_on_water(&mut stat.at_sea_last_race, second_last, first, num_teams);
            stat.shuttle_first_race =
                shared_on_water(&mut stat.at_sea_first_race, last, after.race(1), num_teams);
        }
        stat
    }
}

fn real_teams(race: &Race, num_teams: usize) -> impl Iterator<Item = (usize, &TeamId)> {
    race.teams()
        .iter()
        .enumerate()
        .filter(move |(_, team)| usize::from(**team) < num_teams)
}

/// Collects teams sailing both races and returns the teams left to transfer.
fn shared_on_water(shared: &mut Vec<TeamId>, a: &Race, b: &Race, num_teams: usize) -> usize {
    let transfer = a.participants(num_teams).max(b.participants(num_teams));
    shared.extend(
        real_teams(a, num_teams)
            .map(|(_, &t)| t)
            .filter(|&t| b.contains(t)),
    );
    transfer - shared.len()
}

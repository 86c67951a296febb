//! Pairwise meeting counts.

use super::{Flight, TeamId};

/// How often each unordered pair of real teams has raced together.
///
/// Counts are stored lower-triangular: the pair `(a, b)` with `a > b` lives
/// at `a * (a - 1) / 2 + b`. Phantom slots never enter the matrix; instead,
/// every real team sharing a race with a phantom gets its under-participation
/// counter incremented.
///
/// # Example
///
/// ```
/// use regatta_core::{Flight, MatchMatrix, Race};
///
/// let mut matrix = MatchMatrix::new(3);
/// matrix.add_flight(&Flight::new(vec![Race::new([0, 1]), Race::new([2, 3])]));
///
/// assert_eq!(matrix.count(1, 0), 1);
/// assert_eq!(matrix.count(2, 0), 0);
/// assert_eq!(matrix.under_participation(2), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchMatrix {
    num_teams: usize,
    pairs: Vec<u16>,
    under_participation: Vec<u16>,
    flights: usize,
}

impl MatchMatrix {
    /// Creates an empty matrix for `num_teams` real teams.
    pub fn new(num_teams: usize) -> Self {
        Self {
            num_teams,
            pairs: vec![0; num_teams * num_teams.saturating_sub(1) / 2],
            under_participation: vec![0; num_teams],
            flights: 0,
        }
    }

    fn index(a: usize, b: usize) -> usize {
        let (hi, lo) = if a > b { (a, b) } else { (b, a) };
        hi * (hi - 1) / 2 + lo
    }

    /// Adds the pairings of one flight.
    pub fn add_flight(&mut self, flight: &Flight) {
        for race in flight.races() {
            let teams = race.teams();
            for (i, &lower) in teams.iter().enumerate() {
                for &higher in &teams[i + 1..] {
                    let (lower, higher) = (usize::from(lower), usize::from(higher));
                    if lower >= self.num_teams || higher >= self.num_teams || lower == higher {
                        continue;
                    }
                    self.pairs[Self::index(lower, higher)] += 1;
                }
            }
            if race.has_phantom(self.num_teams) {
                for &team in teams {
                    if let Some(counter) = self.under_participation.get_mut(usize::from(team)) {
                        *counter += 1;
                    }
                }
            }
        }
        self.flights += 1;
    }

    /// Number of real teams.
    pub fn num_teams(&self) -> usize {
        self.num_teams
    }

    /// Number of flights added.
    pub fn flights(&self) -> usize {
        self.flights
    }

    /// Meetings of teams `a` and `b`; zero for `a == b` or phantom slots.
    pub fn count(&self, a: TeamId, b: TeamId) -> u16 {
        let (a, b) = (usize::from(a), usize::from(b));
        if a == b || a >= self.num_teams || b >= self.num_teams {
            return 0;
        }
        self.pairs[Self::index(a, b)]
    }

    /// All pair counts in lower-triangular order.
    pub fn pair_counts(&self) -> &[u16] {
        &self.pairs
    }

    /// Races team `team` sailed together with a phantom slot.
    pub fn under_participation(&self, team: TeamId) -> u16 {
        self.under_participation
            .get(usize::from(team))
            .copied()
            .unwrap_or(0)
    }

    /// Under-participation counters indexed by team.
    pub fn under_participation_counts(&self) -> &[u16] {
        &self.under_participation
    }

    /// Mean pair count; zero when there are fewer than two teams.
    pub fn average(&self) -> f64 {
        mean(&self.pairs)
    }

    /// Mean under-participation count over all real teams.
    pub fn average_under_participation(&self) -> f64 {
        mean(&self.under_participation)
    }

    /// Sum of all pair counts.
    pub fn total_meetings(&self) -> u64 {
        self.pairs.iter().map(|&c| u64::from(c)).sum()
    }

    /// Histogram of pair counts.
    ///
    /// Index is the count, the value is the number of ordered pairs meeting
    /// that often (each unordered pair contributes two).
    pub fn distribution(&self) -> Vec<usize> {
        let max = self.pairs.iter().copied().max().unwrap_or(0);
        let mut histogram = vec![0; usize::from(max) + 1];
        for &count in &self.pairs {
            histogram[usize::from(count)] += 2;
        }
        histogram
    }
}

fn mean(values: &[u16]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64
}

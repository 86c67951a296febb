//! Team to boat-slot usage counts.

use super::Flight;

/// How often each team slot has sailed each boat.
///
/// Rows are boats, columns are padded team indices, so phantom slots are
/// tracked like real teams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoatMatrix {
    padded_teams: usize,
    counts: Vec<Vec<u16>>,
    flights: usize,
}

impl BoatMatrix {
    /// Creates an empty matrix.
    pub fn new(num_boats: usize, padded_teams: usize) -> Self {
        Self {
            padded_teams,
            counts: vec![vec![0; padded_teams]; num_boats],
            flights: 0,
        }
    }

    /// Adds the boat assignments of one flight.
    pub fn add_flight(&mut self, flight: &Flight) {
        for race in flight.races() {
            for (boat, &team) in race.teams().iter().enumerate() {
                if let Some(cell) = self
                    .counts
                    .get_mut(boat)
                    .and_then(|row| row.get_mut(usize::from(team)))
                {
                    *cell += 1;
                }
            }
        }
        self.flights += 1;
    }

    /// Number of boats.
    pub fn num_boats(&self) -> usize {
        self.counts.len()
    }

    /// Number of flights added.
    pub fn flights(&self) -> usize {
        self.flights
    }

    /// How often `team` sailed boat `boat`.
    pub fn count(&self, boat: usize, team: usize) -> u16 {
        self.counts[boat][team]
    }

    /// Iterates over every cell, boat by boat.
    pub fn cells(&self) -> impl Iterator<Item = u16> + '_ {
        self.counts.iter().flat_map(|row| row.iter().copied())
    }

    /// Mean usage count over all cells.
    pub fn average(&self) -> f64 {
        let cells = self.counts.len() * self.padded_teams;
        if cells == 0 {
            return 0.0;
        }
        self.cells().map(f64::from).sum::<f64>() / cells as f64
    }

    /// Histogram of usage counts: index is the count, value the number of cells.
    pub fn distribution(&self) -> Vec<usize> {
        let mut histogram = vec![0; self.flights + 1];
        for count in self.cells() {
            let count = usize::from(count);
            if count >= histogram.len() {
                histogram.resize(count + 1, 0);
            }
            histogram[count] += 1;
        }
        histogram
    }
}

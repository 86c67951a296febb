//! Schedules with structural sharing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::{BoatMatrix, Flight, MatchMatrix, ScheduleShape};
use crate::error::{RegattaError, Result};
use crate::score::ScoreCache;

/// An ordered sequence of flights with its derived matrices.
///
/// Schedules are immutable. Flights are reference counted and shared between
/// variants, so replacing one flight never copies the others. A schedule built
/// with [`Schedule::extend`] remembers its base (the same schedule without the
/// last flight), which lets the last flight be replaced by adding only that
/// flight to the base's matrices.
///
/// Every schedule holds at least one flight.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use regatta_core::{Flight, Race, Schedule, ScheduleShape};
///
/// let shape = ScheduleShape::new(4, 2, 2).unwrap();
/// let first = Flight::new(vec![Race::new([0, 1]), Race::new([2, 3])]);
/// let second = Flight::new(vec![Race::new([0, 2]), Race::new([1, 3])]);
///
/// let base = Arc::new(Schedule::new(shape, first));
/// let schedule = Schedule::extend(&base, second);
///
/// assert_eq!(schedule.len(), 2);
/// assert_eq!(schedule.match_matrix().count(0, 1), 1);
/// assert_eq!(schedule.match_matrix().count(0, 2), 1);
/// assert_eq!(schedule.match_matrix().count(0, 3), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Schedule {
    shape: ScheduleShape,
    flights: Vec<Arc<Flight>>,
    base: Option<Arc<Schedule>>,
    match_matrix: MatchMatrix,
    boat_matrix: BoatMatrix,
    hash: u64,
    scores: ScoreCache,
}

impl Schedule {
    /// Creates a schedule holding a single flight.
    pub fn new(shape: ScheduleShape, flight: Flight) -> Self {
        Self::from_shared(shape, vec![Arc::new(flight)], None)
    }

    /// Appends `flight` to `base`, sharing the base's flights.
    pub fn extend(base: &Arc<Schedule>, flight: Flight) -> Self {
        let mut match_matrix = base.match_matrix.clone();
        let mut boat_matrix = base.boat_matrix.clone();
        match_matrix.add_flight(&flight);
        boat_matrix.add_flight(&flight);

        let mut flights = Vec::with_capacity(base.flights.len() + 1);
        flights.extend(base.flights.iter().cloned());
        flights.push(Arc::new(flight));

        Self {
            shape: base.shape,
            hash: hash_flights(&flights),
            flights,
            base: Some(Arc::clone(base)),
            match_matrix,
            boat_matrix,
            scores: ScoreCache::new(),
        }
    }

    /// Rebuilds a complete schedule from plain flights.
    ///
    /// # Errors
    ///
    /// Returns [`RegattaError::InvalidSchedule`] unless there are exactly
    /// `shape.flights()` flights, each with `shape.races_per_flight()` races of
    /// `shape.num_boats()` slots, holding every padded team index exactly once.
    pub fn from_flights(shape: ScheduleShape, flights: Vec<Flight>) -> Result<Self> {
        if flights.len() != shape.flights() {
            return Err(RegattaError::InvalidSchedule(format!(
                "expected {} flights, found {}",
                shape.flights(),
                flights.len()
            )));
        }
        for (index, flight) in flights.iter().enumerate() {
            validate_flight(&shape, flight).map_err(|reason| {
                RegattaError::InvalidSchedule(format!("flight {}: {reason}", index + 1))
            })?;
        }
        let flights = flights.into_iter().map(Arc::new).collect();
        Ok(Self::from_shared(shape, flights, None))
    }

    fn from_shared(
        shape: ScheduleShape,
        flights: Vec<Arc<Flight>>,
        base: Option<Arc<Schedule>>,
    ) -> Self {
        let mut match_matrix = MatchMatrix::new(shape.num_teams());
        let mut boat_matrix = BoatMatrix::new(shape.num_boats(), shape.padded_teams());
        for flight in &flights {
            match_matrix.add_flight(flight);
            boat_matrix.add_flight(flight);
        }
        Self {
            shape,
            hash: hash_flights(&flights),
            flights,
            base,
            match_matrix,
            boat_matrix,
            scores: ScoreCache::new(),
        }
    }

    /// Returns a variant with the last flight replaced.
    ///
    /// Only the new flight is added to the base's matrices when a base exists.
    pub fn with_last_flight(&self, flight: Flight) -> Self {
        match &self.base {
            Some(base) => Self::extend(base, flight),
            None => self.with_flight(self.flights.len() - 1, flight),
        }
    }

    /// Returns an independent variant with the flight at `index` replaced.
    ///
    /// The matrices are rebuilt from all flights and the variant has no base.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn with_flight(&self, index: usize, flight: Flight) -> Self {
        let mut flights = self.flights.clone();
        flights[index] = Arc::new(flight);
        Self::from_shared(self.shape, flights, None)
    }

    /// Returns an independent variant with every flight transformed by `f`.
    pub fn map_flights(&self, mut f: impl FnMut(&Flight) -> Flight) -> Self {
        let flights = self.flights.iter().map(|flight| Arc::new(f(flight))).collect();
        Self::from_shared(self.shape, flights, None)
    }

    /// The schedule dimensions.
    pub fn shape(&self) -> &ScheduleShape {
        &self.shape
    }

    /// Flights in sailing order.
    pub fn flights(&self) -> &[Arc<Flight>] {
        &self.flights
    }

    /// The flight at `index`.
    pub fn flight(&self, index: usize) -> &Flight {
        &self.flights[index]
    }

    /// The most recently added flight.
    pub fn last_flight(&self) -> &Flight {
        // at least one flight by construction
        &self.flights[self.flights.len() - 1]
    }

    /// Number of flights built so far.
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Returns true if the schedule has no flights; never the case once built.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Returns true once every flight of the shape has been built.
    pub fn is_complete(&self) -> bool {
        self.flights.len() == self.shape.flights()
    }

    /// The schedule without its last flight, if it was built incrementally.
    pub fn base(&self) -> Option<&Arc<Schedule>> {
        self.base.as_ref()
    }

    /// Pair meeting counts over all flights.
    pub fn match_matrix(&self) -> &MatchMatrix {
        &self.match_matrix
    }

    /// Boat usage counts over all flights.
    pub fn boat_matrix(&self) -> &BoatMatrix {
        &self.boat_matrix
    }

    /// Memoized scores of this schedule.
    pub fn scores(&self) -> &ScoreCache {
        &self.scores
    }

    /// Plain copies of the flights, e.g. for serialization.
    pub fn to_flights(&self) -> Vec<Flight> {
        self.flights.iter().map(|f| Flight::clone(f)).collect()
    }
}

impl PartialEq for Schedule {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.flights.len() == other.flights.len()
            && self
                .flights
                .iter()
                .zip(&other.flights)
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }
}

impl Eq for Schedule {}

impl Hash for Schedule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

fn hash_flights(flights: &[Arc<Flight>]) -> u64 {
    let mut hasher = DefaultHasher::new();
    flights.len().hash(&mut hasher);
    for flight in flights {
        flight.hash(&mut hasher);
    }
    hasher.finish()
}

fn validate_flight(shape: &ScheduleShape, flight: &Flight) -> std::result::Result<(), String> {
    if flight.len() != shape.races_per_flight() {
        return Err(format!(
            "expected {} races, found {}",
            shape.races_per_flight(),
            flight.len()
        ));
    }
    if let Some((index, race)) = flight
        .races()
        .iter()
        .enumerate()
        .find(|(_, race)| race.len() != shape.num_boats())
    {
        return Err(format!(
            "race {} has {} teams for {} boats",
            index + 1,
            race.len(),
            shape.num_boats()
        ));
    }
    let mut seen = vec![false; shape.padded_teams()];
    for team in flight.team_slots() {
        match seen.get_mut(usize::from(team)) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => return Err(format!("team {} appears more than once", team)),
            None => return Err(format!("team index {} out of range", team)),
        }
    }
    Ok(())
}

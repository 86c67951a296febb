//! Solver statistics and schedule quality counters.

use std::time::{Duration, Instant};

use regatta_core::Schedule;
use regatta_scoring::{shuttles_for, InterFlightStat};
use serde::Serialize;

/// Solver-level statistics.
///
/// Tracks aggregate metrics across both phases of a run.
///
/// # Example
///
/// ```
/// use regatta_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.record_mutation(true);
/// stats.record_mutation(false);
/// stats.record_checkpoint();
///
/// assert_eq!(stats.mutations, 2);
/// assert_eq!(stats.duplicates, 1);
/// assert_eq!(stats.acceptance_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SolverStats {
    /// Candidates generated by mutation or random construction.
    pub mutations: u64,
    /// Candidates discarded as duplicates of a population member.
    pub duplicates: u64,
    /// Scores computed from scratch.
    pub score_calculations: u64,
    /// Checkpoints reached.
    pub checkpoints: u64,
    /// Local searches run (one per branch and flight in phase 1, one in phase 2).
    pub searches: u64,
}

impl SolverStats {
    /// Records a generated candidate and whether it entered the population.
    pub fn record_mutation(&mut self, inserted: bool) {
        self.mutations += 1;
        if !inserted {
            self.duplicates += 1;
        }
    }

    /// Records a score calculation.
    pub fn record_score_calculation(&mut self) {
        self.score_calculations += 1;
    }

    /// Records a checkpoint.
    pub fn record_checkpoint(&mut self) {
        self.checkpoints += 1;
    }

    /// Records the start of a local search.
    pub fn record_search(&mut self) {
        self.searches += 1;
    }

    /// Share of generated candidates that were not duplicates.
    pub fn acceptance_rate(&self) -> f64 {
        if self.mutations == 0 {
            0.0
        } else {
            (self.mutations - self.duplicates) as f64 / self.mutations as f64
        }
    }
}

/// Phase-level statistics.
///
/// # Example
///
/// ```
/// use regatta_solver::stats::PhaseStats;
/// use regatta_solver::PhaseKind;
///
/// let mut stats = PhaseStats::new(PhaseKind::BoatSchedule);
/// stats.record_iteration();
///
/// assert_eq!(stats.phase_index(), 1);
/// assert_eq!(stats.iterations, 1);
/// ```
#[derive(Debug)]
pub struct PhaseStats {
    phase: crate::PhaseKind,
    start_time: Instant,
    /// Local search iterations run in this phase.
    pub iterations: u64,
}

impl PhaseStats {
    pub fn new(phase: crate::PhaseKind) -> Self {
        Self {
            phase,
            start_time: Instant::now(),
            iterations: 0,
        }
    }

    pub fn phase_index(&self) -> usize {
        self.phase.index()
    }

    pub fn record_iteration(&mut self) {
        self.iterations += 1;
    }

    /// Returns the elapsed time for this phase.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Returns iterations per second.
    pub fn iterations_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.iterations as f64 / secs) as u64
        } else {
            0
        }
    }
}

/// The externally reported quality of a finished schedule.
///
/// Counts are summed over all consecutive flight pairs. A race needs
/// `ceil(boats / 2)` shuttle trips when every team must be brought out;
/// each team that can stay on the water saves part of that.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleStatistics {
    /// Shuttle trips saved between the boundary races of two flights.
    pub shuttles_harbour: usize,
    /// Shuttle trips saved between a boundary race and the race next to the
    /// other boundary race.
    pub shuttles_sea: usize,
    /// Teams sailing both boundary races in different boats.
    pub boat_changes: usize,
}

impl ScheduleStatistics {
    /// Computes the counters of `schedule`.
    ///
    /// # Example
    ///
    /// ```
    /// use regatta_core::{Flight, Race, Schedule, ScheduleShape};
    /// use regatta_solver::ScheduleStatistics;
    ///
    /// let shape = ScheduleShape::new(4, 2, 2).unwrap();
    /// let schedule = Schedule::from_flights(shape, vec![
    ///     Flight::new(vec![Race::new([0, 1]), Race::new([2, 3])]),
    ///     Flight::new(vec![Race::new([2, 3]), Race::new([0, 1])]),
    /// ]).unwrap();
    ///
    /// let stats = ScheduleStatistics::of(&schedule);
    /// assert_eq!(stats.shuttles_harbour, 1);
    /// assert_eq!(stats.boat_changes, 0);
    /// ```
    pub fn of(schedule: &Schedule) -> Self {
        let shape = schedule.shape();
        let per_race = shuttles_for(shape.num_boats());
        let mut stats = Self::default();

        for pair in schedule.flights().windows(2) {
            let stat = InterFlightStat::between(&pair[0], &pair[1], shape.num_teams());
            stats.shuttles_harbour += per_race - shuttles_for(stat.shuttle_between_flights);
            if pair[0].len() > 1 {
                stats.shuttles_sea += per_race - shuttles_for(stat.shuttle_first_race);
                stats.shuttles_sea += per_race - shuttles_for(stat.shuttle_last_race);
            }
            stats.boat_changes += stat.change_boats.len();
        }
        stats
    }

    /// Shuttle trips saved in total.
    pub fn saved_shuttles(&self) -> usize {
        self.shuttles_harbour + self.shuttles_sea
    }
}

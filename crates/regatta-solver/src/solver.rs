//! Optimizer entry point.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use regatta_config::{OptimizationConfig, ScheduleConfig};
use regatta_core::{Flight, Result, Schedule, ScheduleShape};
use regatta_scoring::CostFunction;
use serde::{Serialize, Serializer};
use tracing::info;

use crate::event::ProgressListener;
use crate::phase::{BoatSchedulePhase, MatchMatrixPhase};
use crate::scope::SolverScope;
use crate::stats::{ScheduleStatistics, SolverStats};

/// A finished run.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationResult {
    #[serde(rename = "flights", serialize_with = "serialize_flights")]
    pub schedule: Schedule,
    pub statistics: ScheduleStatistics,
    pub match_score: f64,
    pub boat_score: f64,
    pub stats: SolverStats,
    pub duration: Duration,
}

fn serialize_flights<S>(schedule: &Schedule, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(schedule.flights().iter().map(|flight| -> &Flight { flight }))
}

/// Runs both optimization phases for one schedule shape.
///
/// # Example
///
/// ```
/// use regatta_config::OptimizationConfig;
/// use regatta_core::ScheduleShape;
/// use regatta_solver::Optimizer;
///
/// let shape = ScheduleShape::new(6, 2, 3).unwrap();
/// let config = OptimizationConfig::new().with_loops(50).with_individuals(10);
///
/// let result = Optimizer::new(shape, config).unwrap().solve().unwrap();
/// assert_eq!(result.schedule.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Optimizer {
    shape: ScheduleShape,
    config: OptimizationConfig,
    match_matrix: MatchMatrixPhase,
    boat_schedule: BoatSchedulePhase,
}

impl Optimizer {
    /// Creates an optimizer.
    ///
    /// # Errors
    ///
    /// Returns [`RegattaError::Config`](regatta_core::RegattaError::Config)
    /// for an invalid tuning configuration.
    pub fn new(shape: ScheduleShape, config: OptimizationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            shape,
            match_matrix: MatchMatrixPhase::new(config.match_matrix.clone()),
            boat_schedule: BoatSchedulePhase::new(config.boat_schedule.clone()),
            config,
        })
    }

    /// Creates an optimizer from both configuration documents.
    pub fn from_config(schedule: &ScheduleConfig, config: OptimizationConfig) -> Result<Self> {
        Self::new(schedule.shape()?, config)
    }

    pub fn shape(&self) -> &ScheduleShape {
        &self.shape
    }

    pub fn config(&self) -> &OptimizationConfig {
        &self.config
    }

    /// Runs both phases to completion.
    pub fn solve(&self) -> Result<OptimizationResult> {
        self.solve_with(None, &mut ())
    }

    /// Runs both phases, reporting to `listener` and stopping with
    /// [`RegattaError::Cancelled`](regatta_core::RegattaError::Cancelled) once
    /// `terminate` is set.
    pub fn solve_with<L>(
        &self,
        terminate: Option<Arc<AtomicBool>>,
        listener: &mut L,
    ) -> Result<OptimizationResult>
    where
        L: ProgressListener + ?Sized,
    {
        info!(
            event = "solve_start",
            teams = self.shape.num_teams(),
            boats = self.shape.num_boats(),
            flights = self.shape.flights(),
            seed = self.config.seed,
        );

        let mut scope = SolverScope::new(self.config.seed);
        if let Some(flag) = terminate {
            scope = scope.with_terminate_early_flag(flag);
        }

        let schedule = self.optimize_match_matrix(&mut scope, listener)?;
        let schedule = self.optimize_boat_schedule(&mut scope, schedule, listener)?;

        let mut result = self.evaluate(schedule);
        result.duration = scope.elapsed();
        result.stats = scope.take_stats();

        info!(
            event = "solve_end",
            duration_ms = result.duration.as_millis() as u64,
            match_score = result.match_score,
            boat_score = result.boat_score,
            shuttles_harbour = result.statistics.shuttles_harbour,
            shuttles_sea = result.statistics.shuttles_sea,
            boat_changes = result.statistics.boat_changes,
            mutations = result.stats.mutations,
        );
        Ok(result)
    }

    /// Phase 1: builds a complete schedule with fair pairings.
    pub fn optimize_match_matrix<L>(
        &self,
        scope: &mut SolverScope,
        listener: &mut L,
    ) -> Result<Schedule>
    where
        L: ProgressListener + ?Sized,
    {
        self.match_matrix.solve(scope, self.shape, listener)
    }

    /// Phase 2: optimizes boats and race order of `schedule`.
    pub fn optimize_boat_schedule<L>(
        &self,
        scope: &mut SolverScope,
        schedule: Schedule,
        listener: &mut L,
    ) -> Result<Schedule>
    where
        L: ProgressListener + ?Sized,
    {
        self.boat_schedule.solve(scope, schedule, listener)
    }

    /// Scores an existing schedule with this optimizer's cost functions.
    pub fn evaluate(&self, schedule: Schedule) -> OptimizationResult {
        OptimizationResult {
            statistics: ScheduleStatistics::of(&schedule),
            match_score: self.match_matrix.cost().score(&schedule),
            boat_score: self.boat_schedule.cost().score(&schedule),
            schedule,
            stats: SolverStats::default(),
            duration: Duration::ZERO,
        }
    }
}

impl OptimizationResult {
    /// Plain flights of the schedule.
    pub fn flights(&self) -> Vec<Flight> {
        self.schedule.to_flights()
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;

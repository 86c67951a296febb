//! Phase 1: incremental beam search over flights.

use std::sync::Arc;

use rand::seq::SliceRandom;
use regatta_config::MatchMatrixConfig;
use regatta_core::{scores_tied, RegattaError, Result, Schedule, ScheduleShape};
use regatta_scoring::{CostFunction, MatchFairnessWeights, MatchMatrixCost};
use tracing::{debug, info, trace};

use super::{offer, Individual, Population};
use crate::event::{Checkpoint, PhaseKind, ProgressListener};
use crate::heuristic::{random_flight, swap_between_races};
use crate::scope::SolverScope;
use crate::stats::PhaseStats;
use crate::termination::{CheckpointCadence, EarlyStopping};

/// Builds the schedule flight by flight, optimizing pairings.
///
/// The first flight is random. For each further flight, every branch (a
/// partial schedule kept from the previous flight) runs a local search over
/// candidate next flights. The completions tied with the best found across
/// all branches become the next branches, randomly thinned to
/// `max_branches`.
#[derive(Debug, Clone)]
pub struct MatchMatrixPhase {
    config: MatchMatrixConfig,
    cost: MatchMatrixCost,
}

impl MatchMatrixPhase {
    pub fn new(config: MatchMatrixConfig) -> Self {
        let cost = MatchMatrixCost::new(MatchFairnessWeights {
            factor_less_participants: config.factor_less_participants,
            factor_team_missing: config.factor_team_missing,
        });
        Self { config, cost }
    }

    pub fn cost(&self) -> &MatchMatrixCost {
        &self.cost
    }

    /// Builds a complete schedule of `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`RegattaError::Cancelled`] when termination is requested,
    /// or any error raised by `listener`.
    pub fn solve<L>(
        &self,
        scope: &mut SolverScope,
        shape: ScheduleShape,
        listener: &mut L,
    ) -> Result<Schedule>
    where
        L: ProgressListener + ?Sized,
    {
        let phase = PhaseKind::MatchMatrix;
        let mut phase_stats = PhaseStats::new(phase);
        info!(
            event = "phase_start",
            phase = phase.name(),
            phase_index = phase.index(),
            flights = shape.flights(),
            races_per_flight = shape.races_per_flight(),
        );
        listener.on_phase_start(phase);

        let first = random_flight(&shape, scope.rng());
        let mut branches = vec![Arc::new(Schedule::new(shape, first))];

        for flight in 1..shape.flights() {
            debug!(
                event = "flight_start",
                flight = flight,
                branches = branches.len(),
            );

            let candidates =
                self.next_branches(scope, &branches, flight, listener, &mut phase_stats)?;
            branches = candidates
                .into_iter()
                .map(|c| Arc::new(c.schedule))
                .collect();
        }

        let schedule = branches
            .into_iter()
            .next()
            .map(Arc::unwrap_or_clone)
            .ok_or_else(|| RegattaError::Internal("no branch survived".into()))?;
        let score = self.cost.score(&schedule);

        info!(
            event = "phase_end",
            phase = phase.name(),
            phase_index = phase.index(),
            duration_ms = phase_stats.elapsed_ms(),
            steps = phase_stats.iterations,
            speed = phase_stats.iterations_per_second(),
            score = score,
        );
        listener.on_phase_end(phase, score);
        Ok(schedule)
    }

    /// Extends every branch by flight `flight` and returns the completions tied
    /// with the best score over all branches, at most `max_branches` of them.
    ///
    /// Completions keep their discovery order unless they must be thinned,
    /// in which case a uniform random subset is kept.
    pub fn next_branches<L>(
        &self,
        scope: &mut SolverScope,
        branches: &[Arc<Schedule>],
        flight: usize,
        listener: &mut L,
        phase_stats: &mut PhaseStats,
    ) -> Result<Vec<Individual>>
    where
        L: ProgressListener + ?Sized,
    {
        let mut candidates: Vec<Individual> = Vec::new();
        for branch in branches {
            let completions = self.best_flights(scope, branch, flight, listener, phase_stats)?;
            for completion in completions {
                if !candidates.iter().any(|c| c.schedule == completion.schedule) {
                    candidates.push(completion);
                }
            }
        }

        let best = candidates
            .iter()
            .map(|c| c.score)
            .fold(f64::INFINITY, f64::min);
        candidates.retain(|c| scores_tied(c.score, best));
        let tied = candidates.len();
        if candidates.len() > self.config.max_branches {
            candidates.shuffle(scope.rng());
            candidates.truncate(self.config.max_branches);
        }

        debug!(
            event = "branches",
            flight = flight,
            tied = tied,
            kept = candidates.len(),
            score = best,
            distribution = ?candidates.first().map(|c| c.schedule.match_matrix().distribution()),
        );
        Ok(candidates)
    }

    /// Searches next flights for `base` and returns all completions tied with
    /// the best one found.
    fn best_flights<L>(
        &self,
        scope: &mut SolverScope,
        base: &Arc<Schedule>,
        flight: usize,
        listener: &mut L,
        phase_stats: &mut PhaseStats,
    ) -> Result<Vec<Individual>>
    where
        L: ProgressListener + ?Sized,
    {
        let shape = *base.shape();
        let loops = self.config.loops;
        let cadence = CheckpointCadence::new(self.config.show_every_n, loops);
        let stopping = EarlyStopping::new(self.config.early_stopping);
        scope.stats_mut().record_search();

        let mut population = Population::new(self.config.individuals);
        for _ in 0..self.config.individuals {
            let candidate = Schedule::extend(base, random_flight(&shape, scope.rng()));
            offer(&self.cost, scope, &mut population, candidate);
        }
        if population.is_empty() {
            return Err(RegattaError::Config(
                "match_matrix.individuals must be positive".into(),
            ));
        }
        population.select();

        for iteration in 0..loops {
            for _ in 0..self.config.swap_teams {
                let parent = population.pick(scope.rng());
                let child = swap_between_races(parent, scope.rng());
                offer(&self.cost, scope, &mut population, child);
            }
            population.select();
            phase_stats.record_iteration();
            trace!(
                event = "step",
                flight = flight,
                iteration = iteration,
                population = population.len(),
                best_score = population.best_score(),
            );

            if cadence.is_checkpoint(iteration) {
                population.age_all();
                scope.checkpoint(
                    listener,
                    Checkpoint {
                        phase: PhaseKind::MatchMatrix,
                        flight: Some(flight),
                        iteration,
                        loops,
                        best_score: population.best_score(),
                        worst_score: population.worst_score(),
                        best_age: population.best_age(),
                    },
                )?;
                if stopping.should_stop(population.best_age()) {
                    debug!(
                        event = "early_stopping",
                        phase = PhaseKind::MatchMatrix.name(),
                        flight = flight,
                        iteration = iteration,
                        best_age = population.best_age(),
                    );
                    break;
                }
            }
        }
        Ok(population.into_tied_with_best())
    }
}

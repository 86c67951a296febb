//! Phase 2: boat and race order search.

use regatta_config::BoatScheduleConfig;
use regatta_core::{RegattaError, Result, Schedule};
use regatta_scoring::{BoatScheduleCost, BoatScheduleWeights};
use tracing::{debug, info, trace};

use super::{offer, Population};
use crate::event::{Checkpoint, PhaseKind, ProgressListener};
use crate::heuristic::{shuffle_boats, shuffle_teams, swap_boats, swap_races};
use crate::scope::SolverScope;
use crate::stats::PhaseStats;
use crate::termination::{CheckpointCadence, EarlyStopping};

/// Reassigns boats and reorders races of a complete schedule.
///
/// Pairings are fixed at this point; only boat slots within races and the
/// order of races within flights change. The search stops early when the
/// best candidate stops improving or the whole population ties.
#[derive(Debug, Clone)]
pub struct BoatSchedulePhase {
    config: BoatScheduleConfig,
    cost: BoatScheduleCost,
}

impl BoatSchedulePhase {
    pub fn new(config: BoatScheduleConfig) -> Self {
        let cost = BoatScheduleCost::new(BoatScheduleWeights {
            stay_on_boat: config.weight_stay_on_boat,
            stay_on_shuttle: config.weight_stay_on_shuttle,
            change_between_boats: config.weight_change_between_boats,
        });
        Self { config, cost }
    }

    pub fn cost(&self) -> &BoatScheduleCost {
        &self.cost
    }

    /// Returns true if the phase runs at all.
    pub fn is_enabled(&self) -> bool {
        self.config.loops > 0
    }

    /// Optimizes the boats of `schedule`.
    ///
    /// Returns `schedule` unchanged when the phase is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`RegattaError::Cancelled`] when termination is requested,
    /// or any error raised by `listener`.
    pub fn solve<L>(
        &self,
        scope: &mut SolverScope,
        schedule: Schedule,
        listener: &mut L,
    ) -> Result<Schedule>
    where
        L: ProgressListener + ?Sized,
    {
        let phase = PhaseKind::BoatSchedule;
        if !self.is_enabled() {
            debug!(event = "phase_skipped", phase = phase.name());
            return Ok(schedule);
        }

        let mut phase_stats = PhaseStats::new(phase);
        let loops = self.config.loops;
        let cadence = CheckpointCadence::new(self.config.show_every_n, loops);
        let stopping = EarlyStopping::new(self.config.early_stopping);
        info!(
            event = "phase_start",
            phase = phase.name(),
            phase_index = phase.index(),
            loops = loops,
            individuals = self.config.individuals,
        );
        listener.on_phase_start(phase);
        scope.stats_mut().record_search();

        let shuffled = shuffle_boats(&schedule, scope.rng());
        let last = shuffled.len() - 1;
        let mut population = Population::new(self.config.individuals);
        for _ in 0..self.config.individuals {
            let mut flight = shuffled.last_flight().clone();
            shuffle_teams(&mut flight, scope.rng());
            offer(&self.cost, scope, &mut population, shuffled.with_flight(last, flight));
        }
        if population.is_empty() {
            return Err(RegattaError::Config(
                "boat_schedule.individuals must be positive".into(),
            ));
        }
        population.select();

        for iteration in 0..loops {
            for _ in 0..self.config.swap_boats {
                let parent = population.pick(scope.rng());
                let child = swap_boats(parent, scope.rng());
                offer(&self.cost, scope, &mut population, child);
            }
            for _ in 0..self.config.swap_races {
                let parent = population.pick(scope.rng());
                let child = swap_races(parent, scope.rng());
                offer(&self.cost, scope, &mut population, child);
            }
            population.select();
            phase_stats.record_iteration();
            trace!(
                event = "step",
                iteration = iteration,
                population = population.len(),
                best_score = population.best_score(),
            );

            if cadence.is_checkpoint(iteration) {
                population.age_all();
                scope.checkpoint(
                    listener,
                    Checkpoint {
                        phase,
                        flight: None,
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
                        phase = phase.name(),
                        iteration = iteration,
                        best_age = population.best_age(),
                    );
                    break;
                }
            }
            if population.has_converged() {
                debug!(
                    event = "converged",
                    phase = phase.name(),
                    iteration = iteration,
                    score = population.best_score(),
                );
                break;
            }
        }

        let best = population
            .into_best()
            .ok_or_else(|| RegattaError::Internal("empty boat schedule population".into()))?;

        info!(
            event = "phase_end",
            phase = phase.name(),
            phase_index = phase.index(),
            duration_ms = phase_stats.elapsed_ms(),
            steps = phase_stats.iterations,
            speed = phase_stats.iterations_per_second(),
            score = best.score,
        );
        listener.on_phase_end(phase, best.score);
        Ok(best.schedule)
    }
}

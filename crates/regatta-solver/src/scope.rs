//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use regatta_core::{RegattaError, Result};
use tracing::debug;

use crate::event::{Checkpoint, ProgressListener};
use crate::stats::SolverStats;

/// State shared by the phases of one run.
///
/// Owns the run's only random number generator, so a run is reproducible
/// from its seed as long as the phases draw in a fixed order.
#[derive(Debug)]
pub struct SolverScope {
    rng: ChaCha8Rng,
    start_time: Instant,
    stats: SolverStats,
    terminate_early_flag: Option<Arc<AtomicBool>>,
}

impl SolverScope {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            start_time: Instant::now(),
            stats: SolverStats::default(),
            terminate_early_flag: None,
        }
    }

    /// Sets the cooperative cancellation flag, checked at every checkpoint.
    pub fn with_terminate_early_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_early_flag = Some(flag);
        self
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SolverStats {
        &mut self.stats
    }

    pub fn take_stats(&mut self) -> SolverStats {
        std::mem::take(&mut self.stats)
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Reports a checkpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RegattaError::Cancelled`] if termination was requested, or
    /// whatever error the listener returns.
    pub fn checkpoint<L>(&mut self, listener: &mut L, checkpoint: Checkpoint) -> Result<()>
    where
        L: ProgressListener + ?Sized,
    {
        self.stats.record_checkpoint();
        debug!(
            event = "checkpoint",
            phase = checkpoint.phase.name(),
            flight = checkpoint.flight,
            iteration = checkpoint.iteration,
            loops = checkpoint.loops,
            best_score = checkpoint.best_score,
            worst_score = checkpoint.worst_score,
            best_age = checkpoint.best_age,
        );
        if self.is_terminate_early() {
            return Err(RegattaError::Cancelled);
        }
        listener.on_checkpoint(&checkpoint)
    }
}

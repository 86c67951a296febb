//! Progress reporting and run events.
//!
//! Phases report to a [`ProgressListener`] at phase boundaries and at every
//! checkpoint. A listener may abort the run by returning an error from
//! [`ProgressListener::on_checkpoint`]; the error propagates out of the
//! solver unchanged.
//!
//! # Usage
//!
//! ```
//! use regatta_core::Result;
//! use regatta_solver::{Checkpoint, PhaseKind, ProgressListener};
//!
//! let mut best = f64::INFINITY;
//! let mut listener = |checkpoint: &Checkpoint| -> Result<()> {
//!     best = best.min(checkpoint.best_score);
//!     Ok(())
//! };
//!
//! listener
//!     .on_checkpoint(&Checkpoint {
//!         phase: PhaseKind::MatchMatrix,
//!         flight: Some(1),
//!         iteration: 0,
//!         loops: 10,
//!         best_score: 3.5,
//!         worst_score: 4.0,
//!         best_age: 1,
//!     })
//!     .unwrap();
//! assert_eq!(best, 3.5);
//! ```

use std::fmt;

use regatta_core::Result;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::solver::OptimizationResult;

/// The two optimization phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    /// Phase 1: pairings, flight by flight.
    MatchMatrix,
    /// Phase 2: boats and race order of the whole schedule.
    BoatSchedule,
}

impl PhaseKind {
    /// Display name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            PhaseKind::MatchMatrix => "Match Matrix",
            PhaseKind::BoatSchedule => "Boat Schedule",
        }
    }

    /// Zero-based position of the phase in a run.
    pub fn index(self) -> usize {
        match self {
            PhaseKind::MatchMatrix => 0,
            PhaseKind::BoatSchedule => 1,
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Population state at a checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checkpoint {
    pub phase: PhaseKind,
    /// Flight being built; `None` in phase 2.
    pub flight: Option<usize>,
    /// Zero-based iteration.
    pub iteration: usize,
    /// Iteration budget of the search.
    pub loops: usize,
    pub best_score: f64,
    pub worst_score: f64,
    /// Checkpoints the current best has survived.
    pub best_age: u32,
}

/// Receives progress from the phases.
pub trait ProgressListener {
    /// Called at every checkpoint; an error aborts the run.
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<()>;

    /// Called when a phase starts.
    fn on_phase_start(&mut self, _phase: PhaseKind) {}

    /// Called when a phase ends with the score of its result.
    fn on_phase_end(&mut self, _phase: PhaseKind, _score: f64) {}
}

impl ProgressListener for () {
    fn on_checkpoint(&mut self, _checkpoint: &Checkpoint) -> Result<()> {
        Ok(())
    }
}

impl<F> ProgressListener for F
where
    F: FnMut(&Checkpoint) -> Result<()>,
{
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<()> {
        self(checkpoint)
    }
}

/// Lifecycle of a managed run, as sent to observers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SolverEvent {
    Started {
        run_id: u64,
    },
    PhaseStarted {
        run_id: u64,
        phase: PhaseKind,
    },
    Progress {
        run_id: u64,
        checkpoint: Checkpoint,
    },
    PhaseCompleted {
        run_id: u64,
        phase: PhaseKind,
        score: f64,
    },
    Completed {
        run_id: u64,
        result: Box<OptimizationResult>,
    },
    Failed {
        run_id: u64,
        message: String,
    },
    Cancelled {
        run_id: u64,
    },
}

impl SolverEvent {
    pub fn run_id(&self) -> u64 {
        match self {
            SolverEvent::Started { run_id }
            | SolverEvent::PhaseStarted { run_id, .. }
            | SolverEvent::Progress { run_id, .. }
            | SolverEvent::PhaseCompleted { run_id, .. }
            | SolverEvent::Completed { run_id, .. }
            | SolverEvent::Failed { run_id, .. }
            | SolverEvent::Cancelled { run_id } => *run_id,
        }
    }

    /// Returns true for the last event of a run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SolverEvent::Completed { .. } | SolverEvent::Failed { .. } | SolverEvent::Cancelled { .. }
        )
    }
}

/// Forwards phase progress of one run to an event channel.
///
/// A closed channel is ignored; the run continues without observers.
#[derive(Debug, Clone)]
pub struct EventForwarder {
    run_id: u64,
    sender: UnboundedSender<SolverEvent>,
}

impl EventForwarder {
    pub fn new(run_id: u64, sender: UnboundedSender<SolverEvent>) -> Self {
        Self { run_id, sender }
    }

    pub fn send(&self, event: SolverEvent) {
        let _ = self.sender.send(event);
    }
}

impl ProgressListener for EventForwarder {
    fn on_checkpoint(&mut self, checkpoint: &Checkpoint) -> Result<()> {
        self.send(SolverEvent::Progress {
            run_id: self.run_id,
            checkpoint: checkpoint.clone(),
        });
        Ok(())
    }

    fn on_phase_start(&mut self, phase: PhaseKind) {
        self.send(SolverEvent::PhaseStarted {
            run_id: self.run_id,
            phase,
        });
    }

    fn on_phase_end(&mut self, phase: PhaseKind, score: f64) {
        self.send(SolverEvent::PhaseCompleted {
            run_id: self.run_id,
            phase,
            score,
        });
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

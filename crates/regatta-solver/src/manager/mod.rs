//! Concurrent optimization runs.
//!
//! A [`SolverManager`] owns a fixed pool of worker threads fed by a bounded
//! queue. Each run is identified by a caller-chosen id (one per regatta); a
//! second submission for an id that is queued or running is rejected, and
//! so is any submission while the queue is full. Runs report through a
//! [`SolverEvent`] channel and end with exactly one of `Completed`,
//! `Cancelled` or `Failed`.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use regatta_config::ManagerConfig;
use regatta_core::{RegattaError, Result};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use crate::event::{EventForwarder, SolverEvent};
use crate::solver::{OptimizationResult, Optimizer};

#[cfg(test)]
mod tests;

/// Why a submission was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManagerError {
    #[error("run {0} is already queued or running")]
    AlreadyRunning(u64),

    #[error("run queue is full")]
    QueueFull,

    #[error("solver manager is shut down")]
    ShutDown,
}

type RunMap = Arc<Mutex<HashMap<u64, Arc<AtomicBool>>>>;

struct Job {
    run_id: u64,
    optimizer: Optimizer,
    terminate: Arc<AtomicBool>,
    events: UnboundedSender<SolverEvent>,
}

/// Runs optimizations on a bounded worker pool.
///
/// Dropping the manager cancels every outstanding run, closes the queue and
/// joins the workers.
pub struct SolverManager {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
    runs: RunMap,
}

impl SolverManager {
    /// Starts `worker_count` worker threads.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for zero workers, or an internal error
    /// if a thread cannot be spawned.
    pub fn new(config: &ManagerConfig) -> Result<Self> {
        config.validate()?;
        let (sender, receiver) = channel::bounded::<Job>(config.queue_capacity);
        let runs: RunMap = Arc::default();

        let workers = (0..config.worker_count)
            .map(|index| {
                let receiver = receiver.clone();
                let runs = Arc::clone(&runs);
                thread::Builder::new()
                    .name(format!("optimizer-{index}"))
                    .spawn(move || worker_loop(receiver, runs))
                    .map_err(|e| RegattaError::Internal(format!("cannot spawn worker: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sender: Some(sender),
            workers,
            runs,
        })
    }

    /// Queues a run.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::AlreadyRunning`] if `run_id` is queued or
    /// running, [`ManagerError::QueueFull`] if no queue slot is free.
    pub fn submit(
        &self,
        run_id: u64,
        optimizer: Optimizer,
        events: UnboundedSender<SolverEvent>,
    ) -> std::result::Result<(), ManagerError> {
        let sender = self.sender.as_ref().ok_or(ManagerError::ShutDown)?;
        let terminate = Arc::new(AtomicBool::new(false));
        {
            let mut runs = lock(&self.runs);
            if runs.contains_key(&run_id) {
                warn!(event = "run_rejected", run_id = run_id, reason = "already_running");
                return Err(ManagerError::AlreadyRunning(run_id));
            }
            runs.insert(run_id, Arc::clone(&terminate));
        }

        let job = Job {
            run_id,
            optimizer,
            terminate,
            events,
        };
        match sender.try_send(job) {
            Ok(()) => {
                info!(event = "run_queued", run_id = run_id);
                Ok(())
            }
            Err(err) => {
                lock(&self.runs).remove(&run_id);
                let err = match err {
                    TrySendError::Full(_) => ManagerError::QueueFull,
                    TrySendError::Disconnected(_) => ManagerError::ShutDown,
                };
                warn!(event = "run_rejected", run_id = run_id, reason = %err);
                Err(err)
            }
        }
    }

    /// Requests cancellation of a run.
    ///
    /// Returns false if the run is neither queued nor running.
    pub fn cancel(&self, run_id: u64) -> bool {
        match lock(&self.runs).get(&run_id) {
            Some(flag) => {
                flag.store(true, Ordering::SeqCst);
                info!(event = "run_cancelled", run_id = run_id);
                true
            }
            None => false,
        }
    }

    /// Returns true while a run is queued or running.
    pub fn is_running(&self, run_id: u64) -> bool {
        lock(&self.runs).contains_key(&run_id)
    }

    /// Number of runs queued or running.
    pub fn active_runs(&self) -> usize {
        lock(&self.runs).len()
    }
}

impl Drop for SolverManager {
    fn drop(&mut self) {
        for flag in lock(&self.runs).values() {
            flag.store(true, Ordering::SeqCst);
        }
        self.sender.take();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

impl std::fmt::Debug for SolverManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverManager")
            .field("workers", &self.workers.len())
            .field("active_runs", &self.active_runs())
            .finish()
    }
}

fn lock(runs: &RunMap) -> MutexGuard<'_, HashMap<u64, Arc<AtomicBool>>> {
    runs.lock().unwrap_or_else(PoisonError::into_inner)
}

fn worker_loop(receiver: Receiver<Job>, runs: RunMap) {
    while let Ok(job) = receiver.recv() {
        let run_id = job.run_id;
        let (forwarder, terminal) = run_job(job);
        lock(&runs).remove(&run_id);
        forwarder.send(terminal);
    }
}

/// Runs one job and returns its terminal event, not yet sent, so that the
/// run is removed from the map before observers see the end.
fn run_job(job: Job) -> (EventForwarder, SolverEvent) {
    let Job {
        run_id,
        optimizer,
        terminate,
        events,
    } = job;
    let mut forwarder = EventForwarder::new(run_id, events);

    if terminate.load(Ordering::SeqCst) {
        return (forwarder, SolverEvent::Cancelled { run_id });
    }

    forwarder.send(SolverEvent::Started { run_id });
    let event = terminal_event(run_id, || optimizer.solve_with(Some(terminate), &mut forwarder));
    (forwarder, event)
}

/// Maps the outcome of a run, including a panic, to its terminal event.
fn terminal_event<F>(run_id: u64, solve: F) -> SolverEvent
where
    F: FnOnce() -> Result<OptimizationResult>,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(solve)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(RegattaError::Internal(format!("optimizer panicked: {message}")))
    });

    match outcome {
        Ok(result) => SolverEvent::Completed {
            run_id,
            result: Box::new(result),
        },
        Err(err) if err.is_cancelled() => SolverEvent::Cancelled { run_id },
        Err(err) => {
            warn!(event = "run_failed", run_id = run_id, error = %err);
            SolverEvent::Failed {
                run_id,
                message: err.to_string(),
            }
        }
    }
}

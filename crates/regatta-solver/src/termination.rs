//! Checkpoint cadence and early stopping.
//!
//! Population members age only at checkpoints, so the early stopping
//! threshold counts checkpoints, not iterations.

/// Decides which iterations are checkpoints.
///
/// Iteration `i` is a checkpoint when `i % every == 0` or when it is the last
/// iteration. Without an interval only the last iteration is a checkpoint.
///
/// # Example
///
/// ```
/// use regatta_solver::CheckpointCadence;
///
/// let cadence = CheckpointCadence::new(Some(10), 25);
/// let checkpoints: Vec<_> = (0..25).filter(|&i| cadence.is_checkpoint(i)).collect();
/// assert_eq!(checkpoints, vec![0, 10, 20, 24]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointCadence {
    every: Option<usize>,
    loops: usize,
}

impl CheckpointCadence {
    pub fn new(every: Option<u32>, loops: usize) -> Self {
        Self {
            every: every.filter(|&n| n > 0).map(|n| n as usize),
            loops,
        }
    }

    pub fn is_checkpoint(&self, iteration: usize) -> bool {
        iteration + 1 == self.loops || self.every.is_some_and(|n| iteration % n == 0)
    }
}

/// Stops a search once its best candidate has survived enough checkpoints.
///
/// # Example
///
/// ```
/// use regatta_solver::EarlyStopping;
///
/// let stopping = EarlyStopping::new(Some(3));
/// assert!(!stopping.should_stop(2));
/// assert!(stopping.should_stop(3));
///
/// assert!(!EarlyStopping::new(None).should_stop(u32::MAX));
/// assert!(!EarlyStopping::new(Some(0)).should_stop(u32::MAX));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarlyStopping {
    threshold: Option<u32>,
}

impl EarlyStopping {
    /// Creates the policy; `None` and zero disable it.
    pub fn new(threshold: Option<u32>) -> Self {
        Self {
            threshold: threshold.filter(|&n| n > 0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.threshold.is_some()
    }

    pub fn should_stop(&self, best_age: u32) -> bool {
        self.threshold.is_some_and(|n| best_age >= n)
    }
}

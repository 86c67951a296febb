//! Truncation-selection populations.

use rand::Rng;
use regatta_core::{scores_tied, Schedule};

/// A scored population member.
#[derive(Debug, Clone)]
pub struct Individual {
    pub schedule: Schedule,
    pub score: f64,
    /// Checkpoints survived.
    pub age: u32,
}

/// Candidates of one local search, kept sorted by score after each
/// [`Population::select`].
///
/// New members that equal an existing member are discarded. Selection is a
/// stable sort by ascending score followed by truncation, so on ties older
/// members survive.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Individual>,
    capacity: usize,
}

impl Population {
    /// Creates an empty population keeping at most `capacity` members.
    pub fn new(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity * 2),
            capacity,
        }
    }

    /// Returns true if an equal schedule is already a member.
    pub fn contains(&self, schedule: &Schedule) -> bool {
        self.members.iter().any(|m| &m.schedule == schedule)
    }

    /// Adds a member unless an equal schedule is already present.
    ///
    /// Returns true if the member was added.
    pub fn insert(&mut self, schedule: Schedule, score: f64) -> bool {
        self.insert_with(schedule, |_| score)
    }

    /// Like [`Population::insert`], but scores the schedule only if it is
    /// not a duplicate.
    pub fn insert_with(
        &mut self,
        schedule: Schedule,
        score: impl FnOnce(&Schedule) -> f64,
    ) -> bool {
        if self.contains(&schedule) {
            return false;
        }
        let score = score(&schedule);
        self.members.push(Individual {
            schedule,
            score,
            age: 0,
        });
        true
    }

    /// Sorts by score and drops the worst members beyond capacity.
    pub fn select(&mut self) {
        self.members.sort_by(|a, b| a.score.total_cmp(&b.score));
        self.members.truncate(self.capacity);
    }

    /// Picks a member uniformly at random.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &Schedule {
        &self.members[rng.random_range(0..self.members.len())].schedule
    }

    /// Increments the age of every member.
    pub fn age_all(&mut self) {
        for member in &mut self.members {
            member.age += 1;
        }
    }

    pub fn best(&self) -> Option<&Individual> {
        self.members.first()
    }

    pub fn worst(&self) -> Option<&Individual> {
        self.members.last()
    }

    pub fn best_score(&self) -> f64 {
        self.best().map_or(f64::INFINITY, |m| m.score)
    }

    pub fn worst_score(&self) -> f64 {
        self.worst().map_or(f64::INFINITY, |m| m.score)
    }

    pub fn best_age(&self) -> u32 {
        self.best().map_or(0, |m| m.age)
    }

    /// Returns true if best and worst scores are tied.
    pub fn has_converged(&self) -> bool {
        scores_tied(self.best_score(), self.worst_score())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.members.iter()
    }

    /// Consumes the population, returning the members tied with the best.
    pub fn into_tied_with_best(self) -> Vec<Individual> {
        let best = self.best_score();
        self.members
            .into_iter()
            .filter(|m| scores_tied(m.score, best))
            .collect()
    }

    /// Consumes the population, returning its best member.
    pub fn into_best(self) -> Option<Individual> {
        self.members.into_iter().next()
    }
}

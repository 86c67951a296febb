//! Random construction and mutation operators.
//!
//! - [`random`] - random flights and slot shuffles
//! - [`mutation`] - the perturbations used by the local searches

pub mod mutation;
pub mod random;

#[cfg(test)]
mod tests;

pub use mutation::{swap_between_races, swap_boats, swap_races};
pub use random::{random_flight, shuffle_boats, shuffle_teams};

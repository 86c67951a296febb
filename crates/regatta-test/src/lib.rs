//! Shared test fixtures for regatta crates.
//!
//! - [`schedule`] - flight and schedule builders from team index literals
//! - [`config`] - small, fast configurations
//! - [`invariants`] - structural checks every produced schedule must pass
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! regatta-test = { workspace = true }
//! ```

pub mod config;
pub mod invariants;
pub mod schedule;

pub use config::{quick_optimization, schedule_config};
pub use invariants::assert_schedule_invariants;
pub use schedule::{build_schedule, flight, shape};

//! Configuration fixtures.

use regatta_config::{BoatScheduleConfig, MatchMatrixConfig, OptimizationConfig, ScheduleConfig};

/// A schedule configuration with generated team names.
pub fn schedule_config(teams: usize, boats: usize, flights: usize) -> ScheduleConfig {
    let names = (1..=teams).map(|i| format!("Team {i}")).collect();
    ScheduleConfig::new(names, boats, flights)
}

/// Small populations and a checkpoint every ten loops.
pub fn quick_optimization(loops: usize) -> OptimizationConfig {
    OptimizationConfig::new()
        .with_match_matrix(MatchMatrixConfig {
            loops,
            individuals: 10,
            show_every_n: Some(10),
            ..MatchMatrixConfig::default()
        })
        .with_boat_schedule(BoatScheduleConfig {
            loops,
            individuals: 10,
            show_every_n: Some(10),
            ..BoatScheduleConfig::default()
        })
}

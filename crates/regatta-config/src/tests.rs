//! Tests for regatta configuration.

use super::*;

fn teams(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Team {i}")).collect()
}

#[test]
fn test_schedule_yaml_parsing() {
    let yaml = r##"
        titles: [Bundesliga, Kiel]
        flights: 15
        teams: [A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P, Q, R]
        boats:
          - name: Red
            color: "#ff0000"
          - name: Green
            color: "#00ff00"
          - name: Blue
          - name: Yellow
          - name: Black
          - name: White
    "##;

    let config = ScheduleConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.titles.len(), 2);
    assert_eq!(config.boats[0].color, "#ff0000");
    assert_eq!(config.boats[2].color, "");

    let shape = config.shape().unwrap();
    assert_eq!(shape.num_teams(), 18);
    assert_eq!(shape.num_boats(), 6);
    assert_eq!(shape.flights(), 15);
    assert!(shape.is_full());
}

#[test]
fn test_optimization_defaults() {
    let config = OptimizationConfig::from_toml_str("").unwrap();
    assert_eq!(config, OptimizationConfig::default());
    assert_eq!(config.seed, 42);

    let mm = &config.match_matrix;
    assert_eq!(mm.loops, 10_000);
    assert_eq!(mm.individuals, 100);
    assert_eq!(mm.early_stopping, None);
    assert_eq!(mm.show_every_n, Some(1_000));
    assert_eq!(mm.swap_teams, 2);
    assert_eq!(mm.max_branches, 1);
    assert_eq!(mm.factor_less_participants, 3.01);
    assert_eq!(mm.factor_team_missing, 20.01);

    let bs = &config.boat_schedule;
    assert_eq!(bs.swap_boats, 2);
    assert_eq!(bs.swap_races, 2);
    assert_eq!(bs.weight_stay_on_boat, 1.0);
    assert_eq!(bs.weight_stay_on_shuttle, 1.0);
    assert_eq!(bs.weight_change_between_boats, 1.0);
}

#[test]
fn test_optimization_yaml_parsing() {
    let yaml = r#"
        seed: 1234
        match_matrix:
          loops: 200
          individuals: 20
          early_stopping: 5
          show_every_n: 10
          max_branches: 4
        boat_schedule:
          loops: 0
    "#;

    let config = OptimizationConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.seed, 1234);
    assert_eq!(config.match_matrix.early_stopping, Some(5));
    assert_eq!(config.match_matrix.max_branches, 4);
    assert_eq!(config.match_matrix.swap_teams, 2);
    assert_eq!(config.boat_schedule.loops, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builder() {
    let config = OptimizationConfig::new()
        .with_seed(7)
        .with_loops(100)
        .with_individuals(10)
        .with_match_matrix(
            MatchMatrixConfig {
                loops: 50,
                ..MatchMatrixConfig::default()
            }
            .with_early_stopping(1)
            .with_show_every_n(1)
            .with_max_branches(3),
        );

    assert_eq!(config.seed, 7);
    assert_eq!(config.match_matrix.loops, 50);
    assert_eq!(config.match_matrix.individuals, 100);
    assert_eq!(config.match_matrix.early_stopping, Some(1));
    assert_eq!(config.boat_schedule.loops, 100);
    assert_eq!(config.boat_schedule.individuals, 10);
}

#[test]
fn test_schedule_validation() {
    let ok = ScheduleConfig::new(teams(6), 2, 3);
    assert!(ok.validate().is_ok());

    let cases = [
        ScheduleConfig::new(Vec::new(), 2, 3),
        ScheduleConfig::new(teams(6), 0, 3),
        ScheduleConfig::new(teams(6), 2, 0),
        ScheduleConfig::new(teams(3), 4, 3),
        ScheduleConfig::new(teams(128), 4, 3),
        ScheduleConfig::new(vec!["A".into(), "B".into(), "A".into()], 2, 3),
    ];
    for config in cases {
        let err = config.shape().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{err}");
    }
}

#[test]
fn test_phase_validation() {
    let config = OptimizationConfig::new().with_individuals(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let config = OptimizationConfig::new()
        .with_match_matrix(MatchMatrixConfig::default().with_max_branches(0));
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let skipped = BoatScheduleConfig {
        loops: 0,
        individuals: 0,
        ..BoatScheduleConfig::default()
    };
    assert!(skipped.validate().is_ok());

    let manager = ManagerConfig {
        worker_count: 0,
        ..ManagerConfig::default()
    };
    assert!(manager.validate().is_err());
}

#[test]
fn test_team_names_and_phantoms() {
    let config = ScheduleConfig::new(teams(5), 2, 1).with_title("Test");
    assert_eq!(config.team_name(0), "Team 1");
    assert_eq!(config.team_name(4), "Team 5");
    assert_eq!(config.team_name(5), "");
    assert_eq!(config.boats[1].name, "Boat 2");
}

#[test]
fn test_config_error_converts_to_regatta_error() {
    let err: RegattaError = ConfigError::Invalid("bad".into()).into();
    assert!(matches!(err, RegattaError::Config(ref msg) if msg == "bad"));
}

#[test]
fn test_load_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let yaml_path = dir.path().join("schedule.yaml");
    std::fs::write(
        &yaml_path,
        "flights: 2\nteams: [a, b, c, d]\nboats: [{name: x}, {name: y}]\n",
    )
    .unwrap();
    let schedule = ScheduleConfig::load(&yaml_path).unwrap();
    assert_eq!(schedule.teams.len(), 4);

    let toml_path = dir.path().join("manager.toml");
    std::fs::write(&toml_path, "worker_count = 4\n").unwrap();
    let manager = ManagerConfig::load(&toml_path).unwrap();
    assert_eq!(manager.worker_count, 4);
    assert_eq!(manager.queue_capacity, 10);

    let missing = ScheduleConfig::load(dir.path().join("missing.toml"));
    assert!(matches!(missing, Err(ConfigError::Io(_))));
}

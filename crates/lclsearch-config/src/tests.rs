//! Tests for run configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        goal = "maximize"
        environment_mode = "reproducible"
        random_seed = 42
        record_history = false

        [annealing]
        initial_temperature = 100.0
        iterations_per_temperature = 50
        cooling = { type = "lundy_mees", beta = 0.001 }

        [termination]
        max_iterations = 10000
        max_seconds = 30
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.goal, Goal::Maximize);
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(42));
    assert!(!config.record_history);
    assert_eq!(config.annealing.iterations_per_temperature, 50);
    assert_eq!(config.annealing.cooling, CoolingConfig::LundyMees { beta: 0.001 });
    assert_eq!(config.termination.max_iterations, Some(10000));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    assert!(!config.termination.must_improve);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: full_assert
        random_seed: 42
        annealing:
          cooling:
            type: geometric
            factor: 0.8
        termination:
          no_improvement: 500
          must_improve: true
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert!(config.environment_mode.verifies_deltas());
    assert_eq!(config.annealing.cooling, CoolingConfig::Geometric { factor: 0.8 });
    assert_eq!(config.annealing.initial_temperature, 2000.0);
    assert_eq!(config.termination.no_improvement, Some(500));
    assert!(config.termination.must_improve);
}

#[test]
fn test_toml_and_yaml_agree() {
    let toml = SolverConfig::from_toml_str(
        r#"
        random_seed = 3
        [termination]
        max_iterations = 20
        no_improvement = 4
    "#,
    )
    .unwrap();
    let yaml = SolverConfig::from_yaml_str(
        r#"
        random_seed: 3
        termination:
          max_iterations: 20
          no_improvement: 4
    "#,
    )
    .unwrap();
    assert_eq!(toml, yaml);
}

#[test]
fn test_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
    assert_eq!(config.goal, Goal::Minimize);
    assert!(config.record_history);
    assert!(!config.termination.is_bounded());
    assert_eq!(config.annealing.cooling, CoolingConfig::Geometric { factor: 0.95 });
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_goal(Goal::Maximize)
        .with_termination_seconds(60)
        .with_max_iterations(1000);

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.goal, Goal::Maximize);
    assert!(config.termination.is_bounded());
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
}

#[test]
fn test_validate_rejects_out_of_domain_values() {
    let bad_factor = SolverConfig::new().with_annealing(AnnealingConfig {
        cooling: CoolingConfig::Geometric { factor: 1.0 },
        ..AnnealingConfig::default()
    });
    assert!(matches!(bad_factor.validate(), Err(ConfigError::Invalid(_))));

    let bad_temperature = SolverConfig::new().with_annealing(AnnealingConfig {
        initial_temperature: -1.0,
        ..AnnealingConfig::default()
    });
    assert!(bad_temperature.validate().is_err());

    let zero_limit = SolverConfig::new().with_max_iterations(0);
    let err = zero_limit.validate().unwrap_err();
    assert!(err.to_string().contains("max_iterations"));

    assert!(SolverConfig::new().with_max_iterations(5).validate().is_ok());
}

#[test]
fn test_min_temperature_bounds_and_validates() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        min_temperature = 0.01
    "#,
    )
    .unwrap();
    assert_eq!(config.termination.min_temperature, Some(0.01));
    assert!(config.termination.is_bounded());
    assert!(config.validate().is_ok());

    for limit in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let mut bad = SolverConfig::new();
        bad.termination.min_temperature = Some(limit);
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("min_temperature"));
    }
}

#[test]
fn test_effective_seed() {
    assert_eq!(SolverConfig::new().effective_seed(), None);
    let reproducible = SolverConfig {
        environment_mode: EnvironmentMode::Reproducible,
        ..SolverConfig::default()
    };
    assert_eq!(reproducible.effective_seed(), Some(0));
    assert_eq!(reproducible.with_random_seed(9).effective_seed(), Some(9));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = SolverConfig::load("/nonexistent/lclsearch.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

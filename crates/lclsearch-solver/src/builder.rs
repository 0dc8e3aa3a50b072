//! Builder module for constructing search components from configuration
//!
//! This module provides the wiring between configuration types and
//! the strategy constructors. Parameter-domain errors surface as
//! [`LocalSearchError::InvalidParameter`].

use lclsearch_config::{AnnealingConfig, CoolingConfig, SolverConfig, TerminationConfig};
use lclsearch_core::{Goal, LocalSearchError, Problem, Result};
use tracing::debug;

use crate::annealing::SimulatedAnnealing;
use crate::cooling::{CoolingSchedule, GeometricCooling, LundyMeesCooling};
use crate::iterations::ConstantIterations;
use crate::termination::{
    MaxIterations, MaxSeconds, MinTemperature, MultiCriterion, MustImprove, NoImprovement,
    Termination,
};

/// Builds the termination tree for `config`.
///
/// Configured limits are combined in the order `max_iterations`,
/// `max_seconds`, `no_improvement`, `must_improve`, `min_temperature`.
///
/// # Errors
///
/// Fails if no limit is configured, since the run would never stop.
///
/// # Example
///
/// ```
/// use lclsearch_config::TerminationConfig;
/// use lclsearch_core::Goal;
/// use lclsearch_solver::builder::build_termination;
/// use lclsearch_solver::termination::Termination;
///
/// let config = TerminationConfig {
///     max_iterations: Some(1000),
///     no_improvement: Some(50),
///     ..TerminationConfig::default()
/// };
/// match build_termination(&config, Goal::Minimize).unwrap() {
///     Termination::Multi(multi) => assert_eq!(multi.len(), 2),
///     other => panic!("unexpected {other:?}"),
/// }
/// assert!(build_termination(&TerminationConfig::default(), Goal::Minimize).is_err());
/// ```
pub fn build_termination(config: &TerminationConfig, goal: Goal) -> Result<Termination> {
    let mut multi = MultiCriterion::default();
    if let Some(limit) = config.max_iterations {
        multi.push(MaxIterations::new(limit)?);
    }
    if let Some(limit) = config.time_limit() {
        multi.push(MaxSeconds::new(limit)?);
    }
    if let Some(patience) = config.no_improvement {
        multi.push(NoImprovement::new(patience, goal)?);
    }
    if config.must_improve {
        multi.push(MustImprove::new(goal));
    }
    if let Some(limit) = config.min_temperature {
        multi.push(MinTemperature::new(limit)?);
    }

    if multi.is_empty() {
        return Err(LocalSearchError::invalid_parameter(
            "termination sets no limit; configure at least one criterion",
        ));
    }
    debug!(event = "termination_built", criteria = multi.len());
    Ok(multi.into())
}

/// Builds the cooling schedule described by `config`.
pub fn build_cooling(config: &AnnealingConfig) -> Result<Box<dyn CoolingSchedule>> {
    let schedule: Box<dyn CoolingSchedule> = match config.cooling {
        CoolingConfig::Geometric { factor } => {
            Box::new(GeometricCooling::new(config.initial_temperature, factor)?)
        }
        CoolingConfig::LundyMees { beta } => {
            Box::new(LundyMeesCooling::new(config.initial_temperature, beta)?)
        }
    };
    Ok(schedule)
}

/// Builds the iterations-per-temperature policy described by `config`.
pub fn build_iterations(config: &AnnealingConfig) -> Result<ConstantIterations> {
    ConstantIterations::new(config.iterations_per_temperature)
}

/// Simulated annealing with every strategy taken from configuration.
pub type ConfiguredAnnealing<P> =
    SimulatedAnnealing<P, Box<dyn CoolingSchedule>, ConstantIterations>;

/// Builds a simulated annealing optimizer for `problem` from `config`.
///
/// Goal, seed and history recording also come from `config`.
pub fn build_annealing<P: Problem>(problem: P, config: &SolverConfig) -> Result<ConfiguredAnnealing<P>> {
    let termination = build_termination(&config.termination, config.goal)?;
    let cooling = build_cooling(&config.annealing)?;
    let iterations = build_iterations(&config.annealing)?;

    let mut optimizer = SimulatedAnnealing::new(problem, cooling, iterations, termination)
        .with_goal(config.goal)
        .with_history(config.record_history);
    if let Some(seed) = config.effective_seed() {
        optimizer = optimizer.with_seed(seed);
    }
    Ok(optimizer)
}

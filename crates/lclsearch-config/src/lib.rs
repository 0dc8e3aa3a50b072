//! Configuration system for lclsearch.
//!
//! Load run configuration from TOML or YAML files to control the
//! annealing schedule and the termination criteria without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use lclsearch_config::{CoolingConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     goal = "minimize"
//!     random_seed = 7
//!
//!     [annealing]
//!     initial_temperature = 500.0
//!     iterations_per_temperature = 200
//!     cooling = { type = "geometric", factor = 0.9 }
//!
//!     [termination]
//!     max_seconds = 30
//!     no_improvement = 5000
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.annealing.cooling, CoolingConfig::Geometric { factor: 0.9 });
//! config.validate().unwrap();
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use lclsearch_config::SolverConfig;
//!
//! let config = SolverConfig::load("lclsearch.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use lclsearch_core::Goal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main run configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Optimization direction.
    #[serde(default)]
    pub goal: Goal,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Environment mode affecting reproducibility and assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Whether runs record their improvement history.
    #[serde(default = "default_record_history")]
    pub record_history: bool,

    /// Simulated annealing schedule.
    #[serde(default)]
    pub annealing: AnnealingConfig,

    /// Termination configuration.
    #[serde(default)]
    pub termination: TerminationConfig,
}

fn default_record_history() -> bool {
    true
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            goal: Goal::default(),
            random_seed: None,
            environment_mode: EnvironmentMode::default(),
            record_history: default_record_history(),
            annealing: AnnealingConfig::default(),
            termination: TerminationConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the optimization direction.
    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination.max_seconds = Some(seconds);
        self
    }

    /// Sets the termination iteration limit.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.termination.max_iterations = Some(iterations);
        self
    }

    /// Replaces the annealing schedule.
    pub fn with_annealing(mut self, annealing: AnnealingConfig) -> Self {
        self.annealing = annealing;
        self
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.time_limit()
    }

    /// The seed a run should use. Reproducible modes fall back to seed 0
    /// when none is configured.
    pub fn effective_seed(&self) -> Option<u64> {
        match self.environment_mode {
            EnvironmentMode::NonReproducible => self.random_seed,
            EnvironmentMode::Reproducible | EnvironmentMode::FullAssert => {
                Some(self.random_seed.unwrap_or(0))
            }
        }
    }

    /// Checks value domains that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.annealing.validate()?;
        self.termination.validate()
    }
}

/// Environment mode affecting run behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    #[default]
    NonReproducible,

    /// Reproducible mode with deterministic behavior.
    Reproducible,

    /// Reproducible, and every incremental delta is checked against a full
    /// recompute.
    FullAssert,
}

impl EnvironmentMode {
    pub fn verifies_deltas(self) -> bool {
        self == EnvironmentMode::FullAssert
    }
}

/// Simulated annealing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AnnealingConfig {
    /// Starting temperature.
    #[serde(default = "default_initial_temperature")]
    pub initial_temperature: f64,

    /// Attempts made at each temperature before cooling.
    #[serde(default = "default_iterations_per_temperature")]
    pub iterations_per_temperature: u64,

    /// Cooling schedule.
    #[serde(default)]
    pub cooling: CoolingConfig,
}

fn default_initial_temperature() -> f64 {
    2000.0
}

fn default_iterations_per_temperature() -> u64 {
    1000
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: default_initial_temperature(),
            iterations_per_temperature: default_iterations_per_temperature(),
            cooling: CoolingConfig::default(),
        }
    }
}

impl AnnealingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "annealing.initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(ConfigError::Invalid(
                "annealing.iterations_per_temperature must be at least 1".to_string(),
            ));
        }
        match self.cooling {
            CoolingConfig::Geometric { factor } if !(factor > 0.0 && factor < 1.0) => {
                Err(ConfigError::Invalid(format!(
                    "annealing.cooling.factor must lie strictly between 0 and 1, got {factor}"
                )))
            }
            CoolingConfig::LundyMees { beta } if !(beta.is_finite() && beta > 0.0) => {
                Err(ConfigError::Invalid(format!(
                    "annealing.cooling.beta must be positive and finite, got {beta}"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Cooling schedule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CoolingConfig {
    /// `T <- T * factor`.
    Geometric { factor: f64 },

    /// `T <- T / (1 + beta * T)`.
    LundyMees { beta: f64 },
}

impl Default for CoolingConfig {
    fn default() -> Self {
        CoolingConfig::Geometric { factor: 0.95 }
    }
}

/// Termination configuration.
///
/// Every configured limit becomes one criterion; they are combined so the
/// run stops as soon as any of them fires.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of attempted moves.
    pub max_iterations: Option<u64>,

    /// Maximum seconds to spend searching.
    pub max_seconds: Option<u64>,

    /// Maximum consecutive attempts without a new best value.
    pub no_improvement: Option<u64>,

    /// Stop at the first attempt that does not improve.
    #[serde(default)]
    pub must_improve: bool,

    /// Stop once cooling brings the temperature to this value or below.
    pub min_temperature: Option<f64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.max_seconds.map(Duration::from_secs)
    }

    /// True if at least one limit is configured.
    pub fn is_bounded(&self) -> bool {
        self.max_iterations.is_some()
            || self.max_seconds.is_some()
            || self.no_improvement.is_some()
            || self.must_improve
            || self.min_temperature.is_some()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, limit) in [
            ("max_iterations", self.max_iterations),
            ("max_seconds", self.max_seconds),
            ("no_improvement", self.no_improvement),
        ] {
            if limit == Some(0) {
                return Err(ConfigError::Invalid(format!(
                    "termination.{name} must be at least 1"
                )));
            }
        }
        if let Some(limit) = self.min_temperature {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "termination.min_temperature must be positive and finite, got {limit}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;

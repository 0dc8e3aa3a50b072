//! How many attempts to make at each temperature.

use std::fmt::Debug;

use lclsearch_core::{LocalSearchError, Result};

/// Decides the attempt budget at a temperature.
///
/// Every attempt counts toward the budget, accepted or rejected.
pub trait IterationsPerTemperature: Send + Debug {
    /// Number of attempts to make at `temperature` before cooling.
    fn iterations(&self, temperature: f64) -> u64;

    /// Restores the policy to its post-construction state.
    fn reset(&mut self) {}
}

/// The same budget at every temperature.
///
/// # Example
///
/// ```
/// use lclsearch_solver::iterations::{ConstantIterations, IterationsPerTemperature};
///
/// let policy = ConstantIterations::new(250).unwrap();
/// assert_eq!(policy.iterations(1000.0), 250);
/// assert_eq!(policy.iterations(0.01), 250);
/// assert!(ConstantIterations::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantIterations {
    count: u64,
}

impl ConstantIterations {
    pub fn new(count: u64) -> Result<Self> {
        if count == 0 {
            return Err(LocalSearchError::invalid_parameter(
                "iterations per temperature must be at least 1",
            ));
        }
        Ok(Self { count })
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl IterationsPerTemperature for ConstantIterations {
    fn iterations(&self, _temperature: f64) -> u64 {
        self.count
    }
}

impl<I: IterationsPerTemperature + ?Sized> IterationsPerTemperature for Box<I> {
    fn iterations(&self, temperature: f64) -> u64 {
        (**self).iterations(temperature)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

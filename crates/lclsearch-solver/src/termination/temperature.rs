//! Temperature-based termination.

use lclsearch_core::{LocalSearchError, Result};

use super::{lifecycle, CriterionState, StopReason, TerminationCriterion};

/// Stops once the driver reports a temperature at or below `limit`.
///
/// Only drivers that cool report temperatures, so under any other driver
/// this criterion never fires.
///
/// # Example
///
/// ```
/// use lclsearch_solver::termination::{MinTemperature, TerminationCriterion};
///
/// let mut term = MinTemperature::new(1.0).unwrap();
/// term.check_temperature(2.5);
/// assert!(term.keep_running());
/// term.check_temperature(1.0);
/// assert!(!term.keep_running());
/// ```
#[derive(Debug, Clone)]
pub struct MinTemperature {
    limit: f64,
    started: bool,
    terminated: bool,
}

impl MinTemperature {
    /// Fails unless `limit` is positive and finite.
    pub fn new(limit: f64) -> Result<Self> {
        if !(limit.is_finite() && limit > 0.0) {
            return Err(LocalSearchError::invalid_parameter(format!(
                "minimum temperature must be positive and finite, got {limit}"
            )));
        }
        Ok(Self {
            limit,
            started: false,
            terminated: false,
        })
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }
}

impl TerminationCriterion for MinTemperature {
    fn start_timing(&mut self) {
        self.started = true;
    }

    fn keep_running(&self) -> bool {
        !self.terminated
    }

    fn iteration_done(&mut self) {
        self.started = true;
    }

    fn check_new_value(&mut self, _value: f64) {
        self.started = true;
    }

    fn check_temperature(&mut self, temperature: f64) {
        self.started = true;
        if !(temperature > self.limit) {
            self.terminated = true;
        }
    }

    fn reset(&mut self) {
        self.started = false;
        self.terminated = false;
    }

    fn state(&self) -> CriterionState {
        lifecycle(self.started, self.keep_running())
    }

    fn stop_reason(&self) -> Option<StopReason> {
        self.terminated
            .then_some(StopReason::MinTemperature { limit: self.limit })
    }
}

//! Iteration-count termination.

use lclsearch_core::{LocalSearchError, Result};

use super::{lifecycle, CriterionState, StopReason, TerminationCriterion};

/// Keeps running while fewer than `limit` iterations are done.
///
/// # Example
///
/// ```
/// use lclsearch_solver::termination::{MaxIterations, TerminationCriterion};
///
/// let mut term = MaxIterations::new(2).unwrap();
/// term.iteration_done();
/// assert!(term.keep_running());
/// term.iteration_done();
/// assert!(!term.keep_running());
/// ```
#[derive(Debug, Clone)]
pub struct MaxIterations {
    limit: u64,
    iterations: u64,
    started: bool,
}

impl MaxIterations {
    pub fn new(limit: u64) -> Result<Self> {
        if limit == 0 {
            return Err(LocalSearchError::invalid_parameter(
                "iteration limit must be at least 1",
            ));
        }
        Ok(Self {
            limit,
            iterations: 0,
            started: false,
        })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Iterations recorded since construction or the last reset.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}

impl TerminationCriterion for MaxIterations {
    fn start_timing(&mut self) {
        self.started = true;
    }

    fn keep_running(&self) -> bool {
        self.iterations < self.limit
    }

    fn iteration_done(&mut self) {
        self.started = true;
        self.iterations = self.iterations.saturating_add(1);
    }

    fn check_new_value(&mut self, _value: f64) {
        self.started = true;
    }

    fn reset(&mut self) {
        self.iterations = 0;
        self.started = false;
    }

    fn state(&self) -> CriterionState {
        lifecycle(self.started, self.keep_running())
    }

    fn stop_reason(&self) -> Option<StopReason> {
        (!self.keep_running()).then_some(StopReason::MaxIterations { limit: self.limit })
    }
}

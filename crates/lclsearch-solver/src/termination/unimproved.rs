//! Termination based on lack of improvement.

use lclsearch_core::{Goal, LocalSearchError, Result};

use super::{lifecycle, CriterionState, StopReason, TerminationCriterion};

/// Stops after `patience` consecutive values that fail to improve on the
/// best value seen.
///
/// The first value always becomes the best. A value that strictly improves
/// in the goal's direction resets the count; anything else increments it.
///
/// # Example
///
/// ```
/// use lclsearch_core::Goal;
/// use lclsearch_solver::termination::{NoImprovement, TerminationCriterion};
///
/// let mut term = NoImprovement::new(2, Goal::Minimize).unwrap();
/// for value in [5.0, 4.0, 4.0] {
///     term.check_new_value(value);
/// }
/// assert!(term.keep_running());
/// term.check_new_value(6.0);
/// assert!(!term.keep_running());
/// ```
#[derive(Debug, Clone)]
pub struct NoImprovement {
    patience: u64,
    goal: Goal,
    best: Option<f64>,
    stagnant: u64,
    started: bool,
    terminated: bool,
}

impl NoImprovement {
    /// Fails if `patience` is zero.
    pub fn new(patience: u64, goal: Goal) -> Result<Self> {
        if patience == 0 {
            return Err(LocalSearchError::invalid_parameter(
                "no-improvement patience must be at least 1",
            ));
        }
        Ok(Self {
            patience,
            goal,
            best: None,
            stagnant: 0,
            started: false,
            terminated: false,
        })
    }

    pub fn patience(&self) -> u64 {
        self.patience
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    /// Best value seen so far.
    pub fn best(&self) -> Option<f64> {
        self.best
    }

    /// Values seen since the last improvement.
    pub fn stagnant(&self) -> u64 {
        self.stagnant
    }
}

impl TerminationCriterion for NoImprovement {
    fn start_timing(&mut self) {
        self.started = true;
    }

    fn keep_running(&self) -> bool {
        !self.terminated
    }

    fn iteration_done(&mut self) {
        self.started = true;
    }

    fn check_new_value(&mut self, value: f64) {
        self.started = true;
        if self.terminated {
            return;
        }
        match self.best {
            Some(best) if !self.goal.is_improvement(value, best) => {
                self.stagnant += 1;
                if self.stagnant >= self.patience {
                    self.terminated = true;
                }
            }
            _ => {
                self.best = Some(value);
                self.stagnant = 0;
            }
        }
    }

    fn reset(&mut self) {
        self.best = None;
        self.stagnant = 0;
        self.started = false;
        self.terminated = false;
    }

    fn state(&self) -> CriterionState {
        lifecycle(self.started, self.keep_running())
    }

    fn stop_reason(&self) -> Option<StopReason> {
        self.terminated.then_some(StopReason::NoImprovement {
            patience: self.patience,
        })
    }
}

/// Stops at the first value that is worse than the best seen so far.
///
/// Equal values keep the run going.
#[derive(Debug, Clone)]
pub struct MustImprove {
    goal: Goal,
    best: Option<f64>,
    started: bool,
    terminated: bool,
}

impl MustImprove {
    pub fn new(goal: Goal) -> Self {
        Self {
            goal,
            best: None,
            started: false,
            terminated: false,
        }
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }
}

impl TerminationCriterion for MustImprove {
    fn start_timing(&mut self) {
        self.started = true;
    }

    fn keep_running(&self) -> bool {
        !self.terminated
    }

    fn iteration_done(&mut self) {
        self.started = true;
    }

    fn check_new_value(&mut self, value: f64) {
        self.started = true;
        if self.terminated {
            return;
        }
        match self.best {
            Some(best) if self.goal.is_improvement(best, value) => self.terminated = true,
            _ => self.best = Some(value),
        }
    }

    fn reset(&mut self) {
        self.best = None;
        self.started = false;
        self.terminated = false;
    }

    fn state(&self) -> CriterionState {
        lifecycle(self.started, self.keep_running())
    }

    fn stop_reason(&self) -> Option<StopReason> {
        self.terminated.then_some(StopReason::MustImprove)
    }
}

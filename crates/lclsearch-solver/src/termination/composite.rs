//! Composite terminations over an ordered list of criteria.

use super::{lifecycle, CriterionState, StopReason, Termination, TerminationCriterion};

/// Keeps running while every child keeps running.
///
/// Lifecycle calls reach every child in insertion order, including children
/// that have already stopped. `keep_running` short-circuits at the first
/// child that refuses. An empty `MultiCriterion` never stops.
///
/// The composite tracks its own start, so it reports `Running` after
/// `start_timing` even with no children.
///
/// # Example
///
/// ```
/// use lclsearch_core::Goal;
/// use lclsearch_solver::termination::{
///     MaxIterations, MultiCriterion, NoImprovement, StopReason, TerminationCriterion,
/// };
///
/// let mut term = MultiCriterion::new(vec![
///     MaxIterations::new(10).unwrap().into(),
///     NoImprovement::new(1, Goal::Minimize).unwrap().into(),
/// ]);
/// term.check_new_value(3.0);
/// term.iteration_done();
/// term.check_new_value(3.0);
/// term.iteration_done();
///
/// assert!(!term.keep_running());
/// assert_eq!(
///     term.stop_reason(),
///     Some(StopReason::MultiCriterion {
///         index: 1,
///         reason: Box::new(StopReason::NoImprovement { patience: 1 }),
///     })
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultiCriterion {
    children: Vec<Termination>,
    started: bool,
}

impl MultiCriterion {
    pub fn new(children: Vec<Termination>) -> Self {
        Self {
            children,
            started: false,
        }
    }

    /// Appends a child after the existing ones.
    pub fn push(&mut self, child: impl Into<Termination>) {
        self.children.push(child.into());
    }

    pub fn with(mut self, child: impl Into<Termination>) -> Self {
        self.push(child);
        self
    }

    pub fn children(&self) -> &[Termination] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl TerminationCriterion for MultiCriterion {
    fn start_timing(&mut self) {
        self.started = true;
        for child in &mut self.children {
            child.start_timing();
        }
    }

    fn keep_running(&self) -> bool {
        self.children.iter().all(|child| child.keep_running())
    }

    fn iteration_done(&mut self) {
        self.started = true;
        for child in &mut self.children {
            child.iteration_done();
        }
    }

    fn check_new_value(&mut self, value: f64) {
        self.started = true;
        for child in &mut self.children {
            child.check_new_value(value);
        }
    }

    fn check_temperature(&mut self, temperature: f64) {
        self.started = true;
        for child in &mut self.children {
            child.check_temperature(temperature);
        }
    }

    fn reset(&mut self) {
        self.started = false;
        for child in &mut self.children {
            child.reset();
        }
    }

    fn state(&self) -> CriterionState {
        lifecycle(self.started, self.keep_running())
    }

    fn stop_reason(&self) -> Option<StopReason> {
        self.children
            .iter()
            .enumerate()
            .find_map(|(index, child)| {
                child.stop_reason().map(|reason| StopReason::MultiCriterion {
                    index,
                    reason: Box::new(reason),
                })
            })
    }
}

/// Keeps running while at least one child keeps running.
///
/// Lifecycle calls reach every child in insertion order, like
/// [`MultiCriterion`]. An empty `AnyCriterion` stops immediately.
///
/// # Example
///
/// ```
/// use lclsearch_solver::termination::{
///     AnyCriterion, MaxIterations, MinTemperature, TerminationCriterion,
/// };
///
/// let mut term = AnyCriterion::new(vec![
///     MaxIterations::new(2).unwrap().into(),
///     MinTemperature::new(1.0).unwrap().into(),
/// ]);
/// term.iteration_done();
/// term.iteration_done();
/// assert!(term.keep_running());
///
/// term.check_temperature(0.5);
/// assert!(!term.keep_running());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnyCriterion {
    children: Vec<Termination>,
    started: bool,
}

impl AnyCriterion {
    pub fn new(children: Vec<Termination>) -> Self {
        Self {
            children,
            started: false,
        }
    }

    /// Appends a child after the existing ones.
    pub fn push(&mut self, child: impl Into<Termination>) {
        self.children.push(child.into());
    }

    pub fn with(mut self, child: impl Into<Termination>) -> Self {
        self.push(child);
        self
    }

    pub fn children(&self) -> &[Termination] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl TerminationCriterion for AnyCriterion {
    fn start_timing(&mut self) {
        self.started = true;
        for child in &mut self.children {
            child.start_timing();
        }
    }

    fn keep_running(&self) -> bool {
        self.children.iter().any(|child| child.keep_running())
    }

    fn iteration_done(&mut self) {
        self.started = true;
        for child in &mut self.children {
            child.iteration_done();
        }
    }

    fn check_new_value(&mut self, value: f64) {
        self.started = true;
        for child in &mut self.children {
            child.check_new_value(value);
        }
    }

    fn check_temperature(&mut self, temperature: f64) {
        self.started = true;
        for child in &mut self.children {
            child.check_temperature(temperature);
        }
    }

    fn reset(&mut self) {
        self.started = false;
        for child in &mut self.children {
            child.reset();
        }
    }

    fn state(&self) -> CriterionState {
        lifecycle(self.started, self.keep_running())
    }

    fn stop_reason(&self) -> Option<StopReason> {
        if self.keep_running() {
            return None;
        }
        let reasons = self
            .children
            .iter()
            .map(|child| child.stop_reason())
            .collect::<Option<Vec<_>>>()?;
        Some(StopReason::AnyCriterion { reasons })
    }
}

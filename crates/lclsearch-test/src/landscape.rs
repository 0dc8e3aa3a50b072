//! A walk over a fixed row of values.
//!
//! The solution is a position; a move steps to an adjacent position. With
//! values like `[3, 1, 2, 4, 0, 5]` started at 1, position 1 is a local
//! optimum that hides the global one at position 4.

use lclsearch_core::{Evaluation, LocalSearchError, Problem, Result};

/// Moves from position `from` to the adjacent position `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone)]
pub struct LandscapeProblem {
    values: Vec<f64>,
    start: usize,
    position: usize,
    pending: Option<Step>,
    proposals: usize,
}

impl LandscapeProblem {
    /// # Panics
    ///
    /// Panics if `start` is not a valid position.
    pub fn new(values: Vec<f64>, start: usize) -> Self {
        assert!(start < values.len(), "start {start} outside the landscape");
        Self {
            values,
            start,
            position: start,
            pending: None,
            proposals: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn steps(&self) -> Vec<Step> {
        let from = self.position;
        let mut steps = Vec::with_capacity(2);
        if from > 0 {
            steps.push(Step { from, to: from - 1 });
        }
        if from + 1 < self.values.len() {
            steps.push(Step { from, to: from + 1 });
        }
        steps
    }
}

impl Problem for LandscapeProblem {
    type Solution = usize;
    type Move = Step;

    /// Cycles through the current neighbours in order.
    fn propose_move(&mut self) -> Result<Step> {
        let steps = self.steps();
        if steps.is_empty() {
            return Err(LocalSearchError::invalid_state("landscape has a single position"));
        }
        let step = steps[self.proposals % steps.len()];
        self.proposals += 1;
        Ok(step)
    }

    fn apply(&mut self, mv: &Step) -> Result<Evaluation> {
        if mv.from != self.position || mv.to >= self.values.len() {
            return Err(LocalSearchError::OutOfRange {
                index: mv.to,
                len: self.values.len(),
            });
        }
        let prior = self.values[self.position];
        self.position = mv.to;
        self.pending = Some(*mv);
        Ok(Evaluation::from_values(prior, self.values[self.position]))
    }

    fn undo(&mut self, mv: &Step) -> Result<()> {
        match self.pending.take() {
            Some(applied) if applied == *mv => {
                self.position = mv.from;
                Ok(())
            }
            _ => Err(LocalSearchError::invalid_state("undo without matching apply")),
        }
    }

    fn current_value(&self) -> Evaluation {
        Evaluation::of(self.values[self.position])
    }

    fn solution(&self) -> &usize {
        &self.position
    }

    fn neighbourhood(&self) -> Result<Vec<Step>> {
        Ok(self.steps())
    }

    fn reset(&mut self) {
        self.position = self.start;
        self.pending = None;
        self.proposals = 0;
    }
}

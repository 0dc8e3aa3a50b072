//! A problem whose proposals follow a fixed script.
//!
//! Each proposal moves the solution, a single number, to the next scripted
//! value. This makes the acceptance decisions of a driver fully observable.

use lclsearch_core::{Evaluation, LocalSearchError, Problem, Result};

/// Moves the scripted value to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedMove {
    pub target: f64,
}

/// A one-number problem that proposes values from a script, cycling when
/// the script runs out.
#[derive(Debug, Clone)]
pub struct ScriptedProblem {
    initial: f64,
    script: Vec<f64>,
    cursor: usize,
    current: f64,
    pending: Option<f64>,
    fail_at: Option<usize>,
    applies: usize,
    undos: usize,
}

impl ScriptedProblem {
    pub fn new(initial: f64, script: Vec<f64>) -> Self {
        Self {
            initial,
            script,
            cursor: 0,
            current: initial,
            pending: None,
            fail_at: None,
            applies: 0,
            undos: 0,
        }
    }

    /// Makes the `n`-th apply (0-based) fail with a computation failure.
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    pub fn applies(&self) -> usize {
        self.applies
    }

    pub fn undos(&self) -> usize {
        self.undos
    }
}

impl Problem for ScriptedProblem {
    type Solution = f64;
    type Move = ScriptedMove;

    fn propose_move(&mut self) -> Result<ScriptedMove> {
        if self.script.is_empty() {
            return Err(LocalSearchError::invalid_state("empty script"));
        }
        let target = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        Ok(ScriptedMove { target })
    }

    fn apply(&mut self, mv: &ScriptedMove) -> Result<Evaluation> {
        if self.fail_at == Some(self.applies) {
            return Err(LocalSearchError::computation_failure("scripted failure"));
        }
        self.applies += 1;
        let evaluation = Evaluation::from_values(self.current, mv.target).checked()?;
        self.pending = Some(self.current);
        self.current = mv.target;
        Ok(evaluation)
    }

    fn undo(&mut self, _mv: &ScriptedMove) -> Result<()> {
        self.undos += 1;
        self.current = self
            .pending
            .take()
            .ok_or_else(|| LocalSearchError::invalid_state("undo without apply"))?;
        Ok(())
    }

    fn current_value(&self) -> Evaluation {
        Evaluation::of(self.current)
    }

    fn solution(&self) -> &f64 {
        &self.current
    }

    fn neighbourhood(&self) -> Result<Vec<ScriptedMove>> {
        Ok(self
            .script
            .iter()
            .map(|&target| ScriptedMove { target })
            .collect())
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.current = self.initial;
        self.pending = None;
        self.applies = 0;
        self.undos = 0;
    }
}

//! The problem contract the search drivers depend on.
//!
//! A driver only ever talks to a [`Problem`]. The generic [`LocalProblem`]
//! builds one out of three independent leaves:
//!
//! - a [`MoveGenerator`] that proposes reversible [`Move`]s,
//! - an [`Evaluator`] that scores a solution, optionally incrementally,
//! - the solution itself.

mod local;

use std::fmt::Debug;

use crate::error::Result;
use crate::evaluation::Evaluation;

pub use local::LocalProblem;

/// A reversible transformation of a solution.
///
/// Moves are transient: they are proposed, applied or discarded, then dropped.
pub trait Move<S>: Send + Debug {
    /// Mutates `solution` in place.
    fn apply(&self, solution: &mut S);

    /// Restores `solution` to its state just before the matching [`apply`].
    ///
    /// [`apply`]: Move::apply
    fn undo(&self, solution: &mut S);

    /// Checks that the move fits `solution`.
    fn validate(&self, _solution: &S) -> Result<()> {
        Ok(())
    }
}

/// Produces candidate moves for a solution.
pub trait MoveGenerator<S>: Send + Debug {
    type Move: Move<S>;

    /// Proposes a random move. Must not mutate the solution.
    fn propose(&mut self, solution: &S) -> Result<Self::Move>;

    /// Every move reachable from `solution`.
    fn all_moves(&self, solution: &S) -> Result<Vec<Self::Move>>;

    /// Checks that the generator can operate on `solution`.
    fn validate(&self, _solution: &S) -> Result<()> {
        Ok(())
    }

    /// Restores the generator to its post-construction state.
    fn reset(&mut self) {}
}

/// Computes the objective value of a solution.
pub trait Evaluator<S, M>: Send + Debug {
    /// Full objective value of `solution`.
    fn evaluate(&self, solution: &S) -> f64;

    /// Change in objective value if `mv` were applied to `solution`.
    ///
    /// Returning `None` makes the caller recompute the full value after
    /// applying the move. When `Some`, the delta must equal the full
    /// recompute minus the current value.
    fn delta(&self, _solution: &S, _mv: &M) -> Option<f64> {
        None
    }

    /// Checks that `solution` has the dimensions this evaluator expects.
    fn validate(&self, _solution: &S) -> Result<()> {
        Ok(())
    }
}

/// A solution coupled with its move generator and evaluator.
///
/// Callers are responsible for pairing every [`undo`] with the [`apply`]
/// directly before it.
///
/// [`undo`]: Problem::undo
/// [`apply`]: Problem::apply
pub trait Problem: Send + Debug {
    type Solution: Clone + Debug + Send;
    type Move: Debug + Send;

    /// Proposes a candidate move without touching the solution.
    fn propose_move(&mut self) -> Result<Self::Move>;

    /// Applies `mv` and returns the new value together with its delta.
    fn apply(&mut self, mv: &Self::Move) -> Result<Evaluation>;

    /// Reverts the last applied move.
    fn undo(&mut self, mv: &Self::Move) -> Result<()>;

    /// Value of the current solution. Pure read.
    fn current_value(&self) -> Evaluation;

    /// The current solution.
    fn solution(&self) -> &Self::Solution;

    /// Every move reachable from the current solution.
    fn neighbourhood(&self) -> Result<Vec<Self::Move>>;

    /// Restores the initial solution.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests;

//! Generic problem built from a generator and an evaluator.

use std::fmt::{self, Debug};

use crate::error::{LocalSearchError, Result};
use crate::evaluation::{approx_eq, Evaluation};

use super::{Evaluator, Move, MoveGenerator, Problem};

/// A [`Problem`] assembled from a solution, a [`MoveGenerator`] and an
/// [`Evaluator`].
///
/// The current objective value is cached and updated incrementally when the
/// evaluator supplies deltas.
///
/// # Example
///
/// ```
/// use lclsearch_core::{ArraySwapGenerator, DistanceMatrix, LocalProblem, Problem, TspEvaluator};
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 4.0],
///     vec![1.0, 0.0, 2.0],
///     vec![4.0, 2.0, 0.0],
/// ]).unwrap();
/// let generator = ArraySwapGenerator::new(3, Some(1)).unwrap();
/// let mut problem = LocalProblem::new(vec![0, 1, 2], generator, TspEvaluator::new(matrix)).unwrap();
///
/// assert_eq!(problem.current_value().value, 7.0);
/// let mv = problem.propose_move().unwrap();
/// problem.apply(&mv).unwrap();
/// problem.undo(&mv).unwrap();
/// assert_eq!(problem.current_value().value, 7.0);
/// ```
pub struct LocalProblem<S, G, E> {
    initial: S,
    initial_value: f64,
    solution: S,
    value: f64,
    // Value before the last `apply`; taken by `undo`.
    pending: Option<f64>,
    generator: G,
    evaluator: E,
    verify_deltas: bool,
}

impl<S, G, E> Debug for LocalProblem<S, G, E>
where
    S: Debug,
    G: Debug,
    E: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalProblem")
            .field("solution", &self.solution)
            .field("value", &self.value)
            .field("generator", &self.generator)
            .field("evaluator", &self.evaluator)
            .finish()
    }
}

impl<S, G, E> LocalProblem<S, G, E>
where
    S: Clone + Debug + Send,
    G: MoveGenerator<S>,
    E: Evaluator<S, G::Move>,
{
    /// Creates a problem, validating `solution` against both the generator
    /// and the evaluator.
    pub fn new(solution: S, generator: G, evaluator: E) -> Result<Self> {
        evaluator.validate(&solution)?;
        generator.validate(&solution)?;
        let initial_value = Evaluation::of(evaluator.evaluate(&solution))
            .checked()?
            .value;
        Ok(Self {
            initial: solution.clone(),
            initial_value,
            solution,
            value: initial_value,
            pending: None,
            generator,
            evaluator,
            verify_deltas: false,
        })
    }

    /// Recomputes the full value after every incremental apply and fails
    /// with [`LocalSearchError::ComputationFailure`] on disagreement.
    pub fn with_delta_verification(mut self, verify: bool) -> Self {
        self.verify_deltas = verify;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn into_solution(self) -> S {
        self.solution
    }
}

impl<S, G, E> Problem for LocalProblem<S, G, E>
where
    S: Clone + Debug + Send,
    G: MoveGenerator<S>,
    G::Move: Debug + Send,
    E: Evaluator<S, G::Move>,
{
    type Solution = S;
    type Move = G::Move;

    fn propose_move(&mut self) -> Result<Self::Move> {
        let mv = self.generator.propose(&self.solution)?;
        mv.validate(&self.solution)?;
        Ok(mv)
    }

    fn apply(&mut self, mv: &Self::Move) -> Result<Evaluation> {
        mv.validate(&self.solution)?;
        let prior = self.value;

        let evaluation = match self.evaluator.delta(&self.solution, mv) {
            Some(delta) => {
                mv.apply(&mut self.solution);
                let evaluation = Evaluation::from_delta(prior, delta);
                if self.verify_deltas {
                    let full = self.evaluator.evaluate(&self.solution);
                    if !approx_eq(full, evaluation.value) {
                        mv.undo(&mut self.solution);
                        return Err(LocalSearchError::computation_failure(format!(
                            "incremental value {} disagrees with full recompute {full} for {mv:?}",
                            evaluation.value
                        )));
                    }
                }
                evaluation
            }
            None => {
                mv.apply(&mut self.solution);
                Evaluation::from_values(prior, self.evaluator.evaluate(&self.solution))
            }
        };

        if let Err(e) = evaluation.checked() {
            mv.undo(&mut self.solution);
            return Err(e);
        }

        self.pending = Some(prior);
        self.value = evaluation.value;
        Ok(evaluation)
    }

    fn undo(&mut self, mv: &Self::Move) -> Result<()> {
        let prior = self
            .pending
            .take()
            .ok_or_else(|| LocalSearchError::invalid_state("undo without a matching apply"))?;
        mv.undo(&mut self.solution);
        self.value = prior;
        Ok(())
    }

    fn current_value(&self) -> Evaluation {
        Evaluation::of(self.value)
    }

    fn solution(&self) -> &S {
        &self.solution
    }

    fn neighbourhood(&self) -> Result<Vec<Self::Move>> {
        self.generator.all_moves(&self.solution)
    }

    fn reset(&mut self) {
        self.solution = self.initial.clone();
        self.value = self.initial_value;
        self.pending = None;
        self.generator.reset();
    }
}

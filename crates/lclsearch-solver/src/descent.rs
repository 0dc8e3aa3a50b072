//! Steepest descent.

use std::time::Instant;

use lclsearch_core::{Goal, LocalSearchError, Problem, Result};
use tracing::{debug, info, trace};

use crate::annealing::OptimizerState;
use crate::result::{HistoryPoint, RunResult};
use crate::search::LocalSearch;
use crate::stats::RunStats;
use crate::termination::{StopReason, Termination, TerminationCriterion};

/// Applies the best move of the whole neighbourhood until none improves.
///
/// Each iteration evaluates every move by applying and undoing it. The run
/// ends at a local optimum or when the termination criterion fires,
/// whichever comes first. The value never gets worse.
#[derive(Debug)]
pub struct SteepestDescent<P> {
    problem: P,
    termination: Termination,
    goal: Goal,
    state: OptimizerState,
    record_history: bool,
}

impl<P: Problem> SteepestDescent<P> {
    pub fn new(problem: P, termination: impl Into<Termination>) -> Self {
        Self {
            problem,
            termination: termination.into(),
            goal: Goal::Minimize,
            state: OptimizerState::Initialized,
            record_history: true,
        }
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn into_problem(self) -> P {
        self.problem
    }

    pub fn state(&self) -> &OptimizerState {
        &self.state
    }

    /// Runs the descent.
    ///
    /// # Errors
    ///
    /// Same contract as [`SimulatedAnnealing::run`](crate::annealing::SimulatedAnnealing::run).
    pub fn run(&mut self) -> Result<RunResult<P::Solution>> {
        if self.state != OptimizerState::Initialized {
            return Err(LocalSearchError::invalid_state(
                "run() called again without reset()",
            ));
        }
        self.state = OptimizerState::Running;
        match self.descend() {
            Ok(result) => {
                self.state = OptimizerState::Terminated(result.stop_reason().clone());
                Ok(result)
            }
            Err(e) => {
                self.state = OptimizerState::Failed;
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        self.problem.reset();
        self.termination.reset();
        self.state = OptimizerState::Initialized;
    }

    fn descend(&mut self) -> Result<RunResult<P::Solution>> {
        let start = Instant::now();
        self.termination.start_timing();

        let mut current = self.problem.current_value().checked()?.value;
        let mut stats = RunStats::default();
        let mut history = self.record_history.then(|| {
            vec![HistoryPoint {
                elapsed: start.elapsed(),
                best: current,
                current,
                iteration: 0,
            }]
        });

        info!(
            event = "run_start",
            algorithm = "Steepest Descent",
            goal = ?self.goal,
            initial_value = current,
        );

        let stop_reason = loop {
            if !self.termination.keep_running() {
                break self.termination.stop_reason();
            }
            let moves = self.problem.neighbourhood()?;
            let mut chosen: Option<(usize, f64)> = None;
            for (index, mv) in moves.iter().enumerate() {
                let evaluation = self.problem.apply(mv)?;
                self.problem.undo(mv)?;
                let reference = chosen.map_or(current, |(_, value)| value);
                if self.goal.is_improvement(evaluation.value, reference) {
                    chosen = Some((index, evaluation.value));
                }
                stats.record_move(false);
            }

            let Some((index, _)) = chosen else {
                break Some(StopReason::LocalOptimum);
            };
            current = self.problem.apply(&moves[index])?.value;
            stats.moves_accepted += 1;
            stats.record_iteration();
            stats.record_improvement();

            trace!(event = "step", step = stats.iterations, value = current);
            debug!(event = "new_best", step = stats.iterations, value = current);
            if let Some(history) = history.as_mut() {
                history.push(HistoryPoint {
                    elapsed: start.elapsed(),
                    best: current,
                    current,
                    iteration: stats.iterations,
                });
            }

            self.termination.check_new_value(current);
            self.termination.iteration_done();
        };

        stats.elapsed = start.elapsed();
        if let Some(history) = history.as_mut() {
            history.push(HistoryPoint {
                elapsed: stats.elapsed,
                best: current,
                current,
                iteration: stats.iterations,
            });
        }

        let stop_reason = stop_reason.ok_or_else(|| {
            LocalSearchError::invalid_state("termination stopped without a reason")
        })?;

        info!(
            event = "run_end",
            algorithm = "Steepest Descent",
            iterations = stats.iterations,
            best_value = current,
            duration_ms = stats.elapsed.as_millis() as u64,
            moves_evaluated = stats.moves_evaluated,
            stop_reason = %stop_reason,
        );

        Ok(RunResult::new(
            self.problem.solution().clone(),
            current,
            stop_reason,
            None,
            stats,
            history,
        ))
    }
}

impl<P: Problem> LocalSearch for SteepestDescent<P> {
    type Solution = P::Solution;

    fn run(&mut self) -> Result<RunResult<P::Solution>> {
        SteepestDescent::run(self)
    }

    fn reset(&mut self) {
        SteepestDescent::reset(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::MaxIterations;
    use lclsearch_test::tsp::{five_city_problem, FIVE_CITY_OPTIMUM};

    #[test]
    fn test_descent_reaches_local_optimum_and_never_worsens() {
        let problem = five_city_problem(3);
        let initial = problem.current_value().value;
        let mut descent = SteepestDescent::new(problem, MaxIterations::new(1_000).unwrap());

        let result = descent.run().unwrap();
        assert_eq!(result.stop_reason(), &StopReason::LocalOptimum);
        assert!(result.best_value() <= initial);
        assert!(result.best_value() >= FIVE_CITY_OPTIMUM);

        let history = result.history().unwrap();
        assert!(history.windows(2).all(|w| w[1].current <= w[0].current));

        // no neighbour improves on the result
        let mut problem = descent.into_problem();
        assert_eq!(problem.solution(), result.best_solution());
        for mv in problem.neighbourhood().unwrap() {
            let evaluation = problem.apply(&mv).unwrap();
            assert!(evaluation.value >= result.best_value());
            problem.undo(&mv).unwrap();
        }
    }

    #[test]
    fn test_descent_respects_termination() {
        let mut descent =
            SteepestDescent::new(five_city_problem(3), MaxIterations::new(1).unwrap());
        let result = descent.run().unwrap();
        assert!(result.iterations() <= 1);
        assert!(descent.run().is_err());
        descent.reset();
        assert!(descent.run().is_ok());
    }
}

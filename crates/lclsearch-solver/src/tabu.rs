//! Tabu search.

use std::collections::VecDeque;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::Instant;

use lclsearch_core::{Goal, LocalSearchError, Problem, Result};
use tracing::{debug, info, trace};

use crate::annealing::OptimizerState;
use crate::result::{HistoryPoint, RunResult};
use crate::search::LocalSearch;
use crate::stats::RunStats;
use crate::termination::{StopReason, Termination, TerminationCriterion};

/// Number of recently visited solutions remembered by default.
pub const DEFAULT_TENURE: usize = 7;

/// Bounded memory of recently visited solutions, oldest evicted first.
#[derive(Debug, Clone)]
pub struct TabuMemory {
    tenure: usize,
    visited: VecDeque<u64>,
}

impl TabuMemory {
    /// Fails if `tenure` is zero.
    pub fn new(tenure: usize) -> Result<Self> {
        if tenure == 0 {
            return Err(LocalSearchError::invalid_parameter(
                "tabu tenure must be at least 1",
            ));
        }
        Ok(Self {
            tenure,
            visited: VecDeque::with_capacity(tenure),
        })
    }

    pub fn tenure(&self) -> usize {
        self.tenure
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    pub fn is_tabu(&self, fingerprint: u64) -> bool {
        self.visited.contains(&fingerprint)
    }

    /// Remembers `fingerprint`, forgetting the oldest entry when full.
    pub fn push(&mut self, fingerprint: u64) {
        if self.visited.len() >= self.tenure {
            self.visited.pop_front();
        }
        self.visited.push_back(fingerprint);
    }

    pub fn clear(&mut self) {
        self.visited.clear();
    }
}

fn fingerprint<S: Hash>(solution: &S) -> u64 {
    let mut hasher = DefaultHasher::new();
    solution.hash(&mut hasher);
    hasher.finish()
}

/// Moves to the best non-tabu neighbour on every iteration, even when it is
/// worse than the current solution.
///
/// Every solution the search moves to is remembered for `tenure` iterations
/// and may not be revisited meanwhile, which lets the search walk out of
/// local optima. The run ends when the termination criterion fires or every
/// neighbour is tabu. The best solution seen is returned.
///
/// # Example
///
/// ```
/// use lclsearch_solver::tabu::TabuSearch;
/// use lclsearch_solver::termination::MaxIterations;
/// use lclsearch_test::LandscapeProblem;
///
/// let problem = LandscapeProblem::new(vec![3.0, 1.0, 2.0, 4.0, 0.0, 5.0], 1);
/// let mut tabu = TabuSearch::new(problem, MaxIterations::new(100).unwrap());
/// let result = tabu.run().unwrap();
/// assert_eq!(result.best_value(), 0.0);
/// ```
#[derive(Debug)]
pub struct TabuSearch<P> {
    problem: P,
    termination: Termination,
    memory: TabuMemory,
    goal: Goal,
    state: OptimizerState,
    record_history: bool,
}

impl<P> TabuSearch<P>
where
    P: Problem,
    P::Solution: Hash,
{
    /// Creates a minimizing search that remembers [`DEFAULT_TENURE`] solutions.
    pub fn new(problem: P, termination: impl Into<Termination>) -> Self {
        Self {
            problem,
            termination: termination.into(),
            memory: TabuMemory {
                tenure: DEFAULT_TENURE,
                visited: VecDeque::with_capacity(DEFAULT_TENURE),
            },
            goal: Goal::Minimize,
            state: OptimizerState::Initialized,
            record_history: true,
        }
    }

    /// Remembers the last `tenure` solutions. Fails if `tenure` is zero.
    pub fn with_tenure(mut self, tenure: usize) -> Result<Self> {
        self.memory = TabuMemory::new(tenure)?;
        Ok(self)
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

    pub fn tenure(&self) -> usize {
        self.memory.tenure()
    }

    pub fn state(&self) -> &OptimizerState {
        &self.state
    }

    /// Runs the search.
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
        match self.search() {
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
        self.memory.clear();
        self.state = OptimizerState::Initialized;
    }

    fn search(&mut self) -> Result<RunResult<P::Solution>> {
        let start = Instant::now();
        self.termination.start_timing();
        self.memory.clear();

        let mut current = self.problem.current_value().checked()?.value;
        let mut best_value = current;
        let mut best_solution = self.problem.solution().clone();
        self.memory.push(fingerprint(self.problem.solution()));

        let mut stats = RunStats::default();
        let mut history = self.record_history.then(|| {
            vec![HistoryPoint {
                elapsed: start.elapsed(),
                best: best_value,
                current,
                iteration: 0,
            }]
        });

        info!(
            event = "run_start",
            algorithm = "Tabu Search",
            goal = ?self.goal,
            initial_value = current,
            tenure = self.memory.tenure(),
        );

        let stop_reason = loop {
            if !self.termination.keep_running() {
                break self.termination.stop_reason();
            }

            let moves = self.problem.neighbourhood()?;
            let mut chosen: Option<(usize, f64, u64)> = None;
            for (index, mv) in moves.iter().enumerate() {
                let evaluation = self.problem.apply(mv)?;
                let visited = fingerprint(self.problem.solution());
                self.problem.undo(mv)?;
                stats.record_move(false);

                if self.memory.is_tabu(visited) {
                    continue;
                }
                let better = chosen
                    .map_or(true, |(_, value, _)| self.goal.is_improvement(evaluation.value, value));
                if better {
                    chosen = Some((index, evaluation.value, visited));
                }
            }

            let Some((index, _, visited)) = chosen else {
                break Some(StopReason::NoAdmissibleMove);
            };
            current = self.problem.apply(&moves[index])?.value;
            self.memory.push(visited);
            stats.moves_accepted += 1;
            stats.record_iteration();

            trace!(event = "step", step = stats.iterations, value = current);

            if self.goal.is_improvement(current, best_value) {
                best_value = current;
                best_solution = self.problem.solution().clone();
                stats.record_improvement();
                debug!(event = "new_best", step = stats.iterations, value = best_value);
                if let Some(history) = history.as_mut() {
                    history.push(HistoryPoint {
                        elapsed: start.elapsed(),
                        best: best_value,
                        current,
                        iteration: stats.iterations,
                    });
                }
            }

            self.termination.check_new_value(current);
            self.termination.iteration_done();
        };

        stats.elapsed = start.elapsed();
        if let Some(history) = history.as_mut() {
            history.push(HistoryPoint {
                elapsed: stats.elapsed,
                best: best_value,
                current,
                iteration: stats.iterations,
            });
        }

        let stop_reason = stop_reason.ok_or_else(|| {
            LocalSearchError::invalid_state("termination stopped without a reason")
        })?;

        info!(
            event = "run_end",
            algorithm = "Tabu Search",
            iterations = stats.iterations,
            best_value = best_value,
            duration_ms = stats.elapsed.as_millis() as u64,
            moves_evaluated = stats.moves_evaluated,
            stop_reason = %stop_reason,
        );

        Ok(RunResult::new(
            best_solution,
            best_value,
            stop_reason,
            None,
            stats,
            history,
        ))
    }
}

impl<P> LocalSearch for TabuSearch<P>
where
    P: Problem,
    P::Solution: Hash,
{
    type Solution = P::Solution;

    fn run(&mut self) -> Result<RunResult<P::Solution>> {
        TabuSearch::run(self)
    }

    fn reset(&mut self) {
        TabuSearch::reset(self)
    }
}

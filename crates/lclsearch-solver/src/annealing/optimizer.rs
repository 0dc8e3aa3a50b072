//! The simulated-annealing driver.

use std::time::Instant;

use lclsearch_core::rng::{create_rng, resolve_seed, SearchRng};
use lclsearch_core::{Goal, LocalSearchError, Problem, Result};
use rand::Rng;
use tracing::{debug, info, trace};

use super::acceptance::acceptance_probability;
use crate::cooling::CoolingSchedule;
use crate::iterations::IterationsPerTemperature;
use crate::result::{HistoryPoint, RunResult};
use crate::search::LocalSearch;
use crate::stats::RunStats;
use crate::termination::{StopReason, Termination, TerminationCriterion};

/// Lifecycle state of an optimizer.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizerState {
    Initialized,
    Running,
    Terminated(StopReason),
    /// A collaborator error aborted the last run.
    Failed,
}

/// Simulated annealing over any [`Problem`].
///
/// All collaborators are built by the caller and handed over by value. A
/// run consumes their state, so running again requires [`reset`].
///
/// [`reset`]: SimulatedAnnealing::reset
///
/// # Example
///
/// ```
/// use lclsearch_core::{ArraySwapGenerator, DistanceMatrix, LocalProblem, TspEvaluator};
/// use lclsearch_solver::annealing::SimulatedAnnealing;
/// use lclsearch_solver::cooling::GeometricCooling;
/// use lclsearch_solver::iterations::ConstantIterations;
/// use lclsearch_solver::termination::MaxIterations;
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 2.0, 9.0, 10.0],
///     vec![2.0, 0.0, 6.0, 4.0],
///     vec![9.0, 6.0, 0.0, 3.0],
///     vec![10.0, 4.0, 3.0, 0.0],
/// ]).unwrap();
/// let generator = ArraySwapGenerator::fixed_start(4, Some(1)).unwrap();
/// let problem = LocalProblem::new(vec![0, 2, 1, 3], generator, TspEvaluator::new(matrix)).unwrap();
///
/// let mut sa = SimulatedAnnealing::new(
///     problem,
///     GeometricCooling::new(10.0, 0.9).unwrap(),
///     ConstantIterations::new(10).unwrap(),
///     MaxIterations::new(500).unwrap(),
/// )
/// .with_seed(7);
///
/// let result = sa.run().unwrap();
/// assert_eq!(result.best_value(), 2.0 + 4.0 + 3.0 + 9.0);
/// assert_eq!(result.iterations(), 500);
/// ```
#[derive(Debug)]
pub struct SimulatedAnnealing<P, C, I> {
    problem: P,
    cooling: C,
    iterations: I,
    termination: Termination,
    goal: Goal,
    seed: u64,
    rng: SearchRng,
    state: OptimizerState,
    record_history: bool,
}

impl<P, C, I> SimulatedAnnealing<P, C, I>
where
    P: Problem,
    C: CoolingSchedule,
    I: IterationsPerTemperature,
{
    /// Creates a minimizing optimizer with a random seed.
    pub fn new(
        problem: P,
        cooling: C,
        iterations: I,
        termination: impl Into<Termination>,
    ) -> Self {
        let seed = resolve_seed(None);
        Self {
            problem,
            cooling,
            iterations,
            termination: termination.into(),
            goal: Goal::Minimize,
            seed,
            rng: create_rng(Some(seed)),
            state: OptimizerState::Initialized,
            record_history: true,
        }
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    /// Seeds the acceptance draws. Runs with equal seeds on equal problems
    /// are identical.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.rng = create_rng(Some(seed));
        self
    }

    /// Enables or disables the improvement history.
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

    pub fn cooling(&self) -> &C {
        &self.cooling
    }

    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &OptimizerState {
        &self.state
    }

    /// Runs the search until the termination criterion stops it.
    ///
    /// # Errors
    ///
    /// Fails with [`LocalSearchError::InvalidState`] unless the optimizer is
    /// freshly built or reset. Any collaborator error aborts the run, leaves
    /// the optimizer `Failed` and is returned unchanged.
    pub fn run(&mut self) -> Result<RunResult<P::Solution>> {
        match &self.state {
            OptimizerState::Initialized => {}
            OptimizerState::Terminated(_) | OptimizerState::Failed => {
                return Err(LocalSearchError::invalid_state(
                    "run() called again without reset()",
                ));
            }
            OptimizerState::Running => {
                return Err(LocalSearchError::invalid_state("optimizer is already running"));
            }
        }

        self.state = OptimizerState::Running;
        match self.anneal() {
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

    /// Resets the problem, every strategy and the random stream.
    pub fn reset(&mut self) {
        self.problem.reset();
        self.cooling.reset();
        self.iterations.reset();
        self.termination.reset();
        self.rng = create_rng(Some(self.seed));
        self.state = OptimizerState::Initialized;
    }

    fn anneal(&mut self) -> Result<RunResult<P::Solution>> {
        let start = Instant::now();
        self.termination.start_timing();

        let initial = self.problem.current_value().checked()?.value;
        let mut current = initial;
        let mut best_value = initial;
        let mut best_solution = self.problem.solution().clone();
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
            algorithm = "Simulated Annealing",
            goal = ?self.goal,
            initial_value = initial,
            temperature = self.cooling.temperature(),
            seed = self.seed,
        );

        let stop_reason = 'cooling: loop {
            let temperature = self.cooling.temperature();
            let budget = self.iterations.iterations(temperature).max(1);

            for _ in 0..budget {
                if !self.termination.keep_running() {
                    break 'cooling self.termination.stop_reason();
                }

                let mv = self.problem.propose_move()?;
                let evaluation = self.problem.apply(&mv)?;
                let probability =
                    acceptance_probability(self.goal.worsening(evaluation.delta), temperature);
                let accepted =
                    probability >= 1.0 || (probability > 0.0 && self.rng.random::<f64>() < probability);

                if accepted {
                    current = evaluation.value;
                } else {
                    self.problem.undo(&mv)?;
                }
                stats.record_move(accepted);
                stats.record_iteration();

                trace!(
                    event = "step",
                    step = stats.iterations,
                    accepted = accepted,
                    value = evaluation.value,
                    delta = evaluation.delta,
                    temperature = temperature,
                );

                if self.goal.is_improvement(current, best_value) {
                    best_value = current;
                    best_solution = self.problem.solution().clone();
                    stats.record_improvement();
                    debug!(
                        event = "new_best",
                        step = stats.iterations,
                        value = best_value,
                        temperature = temperature,
                    );
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
            }

            let next = self.cooling.advance();
            stats.record_temperature_step();
            debug!(
                event = "temperature_step",
                from = temperature,
                to = next,
                step = stats.iterations,
                acceptance_rate = stats.acceptance_rate(),
            );
            self.termination.check_temperature(next);
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
            algorithm = "Simulated Annealing",
            iterations = stats.iterations,
            best_value = best_value,
            duration_ms = stats.elapsed.as_millis() as u64,
            speed = stats.moves_per_second() as u64,
            acceptance_rate = stats.acceptance_rate(),
            stop_reason = %stop_reason,
        );

        Ok(RunResult::new(
            best_solution,
            best_value,
            stop_reason,
            Some(self.cooling.temperature()),
            stats,
            history,
        ))
    }
}

impl<P, C, I> LocalSearch for SimulatedAnnealing<P, C, I>
where
    P: Problem,
    C: CoolingSchedule,
    I: IterationsPerTemperature,
{
    type Solution = P::Solution;

    fn run(&mut self) -> Result<RunResult<P::Solution>> {
        SimulatedAnnealing::run(self)
    }

    fn reset(&mut self) {
        SimulatedAnnealing::reset(self)
    }
}

//! One-call entry points.

use lclsearch_config::SolverConfig;
use lclsearch_core::{ArrayReverseGenerator, DistanceMatrix, LocalProblem, Result, TspEvaluator};
use lclsearch_solver::{build_annealing, RunResult};
use tracing::debug;

/// Finds a short closed tour through every city of `matrix`.
///
/// The search starts from the identity tour, keeps city 0 first and
/// explores segment reversals. Annealing, termination, goal and seed all
/// come from `config`; `full_assert` mode also checks every incremental
/// tour length against a full recompute.
///
/// # Errors
///
/// Fails with [`InvalidParameter`] for fewer than three cities or an
/// out-of-domain configuration, and with any error the run itself raises.
///
/// [`InvalidParameter`]: lclsearch_core::LocalSearchError::InvalidParameter
pub fn solve_tsp(matrix: DistanceMatrix, config: &SolverConfig) -> Result<RunResult<Vec<usize>>> {
    let size = matrix.size();
    debug!(event = "solve_tsp", cities = size, symmetric = matrix.is_symmetric());

    let generator = ArrayReverseGenerator::fixed_start(size, config.effective_seed())?;
    let problem = LocalProblem::new((0..size).collect(), generator, TspEvaluator::new(matrix))?
        .with_delta_verification(config.environment_mode.verifies_deltas());

    let mut optimizer = build_annealing(problem, config)?;
    optimizer.run()
}

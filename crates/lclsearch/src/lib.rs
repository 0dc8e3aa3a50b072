//! lclsearch - Simulated annealing local search in Rust
//!
//! Build a problem from a solution, a move generator and an evaluator, pick
//! the strategies, and run.
//!
//! # Example
//!
//! ```rust
//! use lclsearch::prelude::*;
//!
//! let matrix = DistanceMatrix::from_csv_str(
//!     "0,2,9,10\n2,0,6,4\n9,6,0,3\n10,4,3,0\n",
//!     b',',
//! ).unwrap();
//! let config = SolverConfig::new().with_random_seed(3).with_max_iterations(2_000);
//!
//! let result = solve_tsp(matrix, &config).unwrap();
//! assert_eq!(result.best_value(), 18.0);
//! assert_eq!(result.best_solution()[0], 0);
//! ```

pub mod logging;
mod solve;

pub use solve::solve_tsp;

pub use lclsearch_config as config;
pub use lclsearch_core as core;
pub use lclsearch_solver as solver;

/// Everything needed to set up and run a search.
pub mod prelude {
    pub use crate::solve::solve_tsp;
    pub use lclsearch_config::{
        AnnealingConfig, ConfigError, CoolingConfig, EnvironmentMode, SolverConfig,
        TerminationConfig,
    };
    pub use lclsearch_core::{
        ArrayReverseGenerator, ArraySwapGenerator, BinPackingEvaluator, BinScoring,
        DistanceMatrix, Evaluation, Evaluator, Goal, LocalProblem, LocalSearchError,
        MatrixError, Move, MoveGenerator, Problem, ReverseMove, SwapMove, TspEvaluator,
    };
    pub use lclsearch_solver::{
        build_annealing, AlwaysRun, AnyCriterion, ConstantIterations, CoolingSchedule, External,
        GeometricCooling, IterationsPerTemperature, LocalSearch, LundyMeesCooling, MaxIterations,
        MaxSeconds, MinTemperature, MultiCriterion, MustImprove, NoImprovement, RunResult,
        SimulatedAnnealing, SteepestDescent, StopReason, TabuSearch, Termination,
        TerminationCriterion,
    };
}

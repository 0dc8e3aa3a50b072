//! lclsearch Solver Engine
//!
//! This crate provides the search drivers and their strategies:
//! - Simulated annealing with Metropolis acceptance
//! - Steepest descent and tabu search
//! - Cooling schedules and iterations-per-temperature policies
//! - Termination criteria, composable through `MultiCriterion` and `AnyCriterion`
//! - Run statistics and results
//! - Configuration wiring (builder module)

pub mod annealing;
pub mod builder;
pub mod clock;
pub mod cooling;
pub mod descent;
pub mod iterations;
pub mod result;
pub mod search;
pub mod stats;
pub mod tabu;
pub mod termination;

pub use annealing::{acceptance_probability, is_frozen, OptimizerState, SimulatedAnnealing};
pub use builder::{
    build_annealing, build_cooling, build_iterations, build_termination, ConfiguredAnnealing,
};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use cooling::{CoolingSchedule, GeometricCooling, LundyMeesCooling, MIN_TEMPERATURE};
pub use descent::SteepestDescent;
pub use iterations::{ConstantIterations, IterationsPerTemperature};
pub use result::{HistoryPoint, RunResult};
pub use search::LocalSearch;
pub use stats::RunStats;
pub use tabu::{TabuMemory, TabuSearch};
pub use termination::{
    AlwaysRun, AnyCriterion, CriterionState, External, MaxIterations, MaxSeconds,
    MinTemperature, MultiCriterion, MustImprove, NoImprovement, StopReason, Termination,
    TerminationCriterion,
};

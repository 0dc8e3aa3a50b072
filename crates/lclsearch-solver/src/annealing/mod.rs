//! Simulated annealing.
//!
//! The optimizer proposes a move, applies it, and keeps it according to the
//! Metropolis rule at the current temperature. The cooling schedule lowers
//! the temperature after every attempt budget; the termination criterion is
//! consulted before every attempt and told every new temperature.

mod acceptance;
mod optimizer;

pub use acceptance::{acceptance_probability, is_frozen};
pub use optimizer::{OptimizerState, SimulatedAnnealing};

#[cfg(test)]
mod tests;

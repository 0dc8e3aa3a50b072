//! Shared test fixtures for lclsearch crates.
//!
//! - [`tsp`] - Small tour instances with known optima
//! - [`scripted`] - A problem that replays a fixed sequence of values
//! - [`landscape`] - A walk over a row of values with a known local optimum
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! lclsearch-test = { workspace = true }
//! ```

pub mod landscape;
pub mod scripted;
pub mod tsp;

pub use landscape::{LandscapeProblem, Step};
pub use scripted::{ScriptedMove, ScriptedProblem};
pub use tsp::{five_city_matrix, five_city_problem, FIVE_CITY_OPTIMUM};

//! The interface shared by search drivers.

use std::fmt::Debug;

use lclsearch_core::Result;

use crate::result::RunResult;

/// A search algorithm that can be run and restarted.
pub trait LocalSearch: Send + Debug {
    type Solution;

    /// Runs until the termination criterion stops the search.
    ///
    /// A second call requires a [`reset`](LocalSearch::reset) in between.
    fn run(&mut self) -> Result<RunResult<Self::Solution>>;

    /// Returns the driver and every collaborator to their initial state.
    fn reset(&mut self);
}

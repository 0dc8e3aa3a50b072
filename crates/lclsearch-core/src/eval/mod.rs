//! Objective functions for permutation solutions.

mod bin_packing;
mod tsp;

pub use bin_packing::{BinPackingEvaluator, BinScoring};
pub use tsp::TspEvaluator;

use crate::error::{LocalSearchError, Result};

/// Checks that `solution` is a permutation of `0..size`.
///
/// A wrong length or an index outside `0..size` is out of range; an index
/// that appears twice is an invalid solution.
pub(crate) fn check_permutation(solution: &[usize], size: usize) -> Result<()> {
    if solution.len() != size {
        return Err(LocalSearchError::OutOfRange {
            index: solution.len(),
            len: size,
        });
    }
    let mut seen = vec![false; size];
    for &index in solution {
        if index >= size {
            return Err(LocalSearchError::OutOfRange { index, len: size });
        }
        if std::mem::replace(&mut seen[index], true) {
            return Err(LocalSearchError::invalid_parameter(format!(
                "index {index} appears more than once in the solution"
            )));
        }
    }
    Ok(())
}

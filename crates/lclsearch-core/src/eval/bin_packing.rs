//! Next-fit bin packing over an item order.

use crate::error::{LocalSearchError, Result};
use crate::problem::Evaluator;

use super::check_permutation;

/// How a packing is scored. Lower is better for all three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BinScoring {
    /// Number of bins used.
    #[default]
    BinCount,
    /// Unused capacity summed over every closed bin.
    EmptySpace,
    /// Squared unused capacity summed over every closed bin. Rewards
    /// packings that leave some bins nearly full.
    SquaredEmptySpace,
}

/// Packs items in solution order with next-fit and scores the result.
///
/// The solution is a permutation of item indices. Each item goes into the
/// open bin if it fits, otherwise a new bin is opened for it. The last open
/// bin is never penalised for its empty space.
///
/// # Example
///
/// ```
/// use lclsearch_core::{BinPackingEvaluator, BinScoring};
///
/// let evaluator = BinPackingEvaluator::new(vec![4.0, 6.0, 5.0, 5.0], 10.0, BinScoring::BinCount).unwrap();
/// assert_eq!(evaluator.score(&[0, 1, 2, 3]), 2.0);
/// assert_eq!(evaluator.score(&[0, 2, 1, 3]), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct BinPackingEvaluator {
    weights: Vec<f64>,
    capacity: f64,
    scoring: BinScoring,
}

impl BinPackingEvaluator {
    /// Fails if the capacity is not positive and finite, or if any weight is
    /// negative, non-finite or larger than the capacity.
    pub fn new(weights: Vec<f64>, capacity: f64, scoring: BinScoring) -> Result<Self> {
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(LocalSearchError::invalid_parameter(format!(
                "bin capacity must be positive and finite, got {capacity}"
            )));
        }
        if let Some((index, weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, &w)| !w.is_finite() || w < 0.0 || w > capacity)
        {
            return Err(LocalSearchError::invalid_parameter(format!(
                "item {index} has weight {weight}, expected a value in [0, {capacity}]"
            )));
        }
        Ok(Self {
            weights,
            capacity,
            scoring,
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn scoring(&self) -> BinScoring {
        self.scoring
    }

    /// Fill level of every bin next-fit produces for `order`.
    pub fn pack(&self, order: &[usize]) -> Vec<f64> {
        let mut bins = Vec::new();
        let mut fill = 0.0;
        for &item in order {
            let weight = self.weights[item];
            if fill + weight > self.capacity {
                bins.push(fill);
                fill = weight;
            } else {
                fill += weight;
            }
        }
        if !order.is_empty() {
            bins.push(fill);
        }
        bins
    }

    /// Score of packing items in `order`.
    pub fn score(&self, order: &[usize]) -> f64 {
        let bins = self.pack(order);
        let closed = &bins[..bins.len().saturating_sub(1)];
        match self.scoring {
            BinScoring::BinCount => bins.len() as f64,
            BinScoring::EmptySpace => closed.iter().map(|fill| self.capacity - fill).sum(),
            BinScoring::SquaredEmptySpace => closed
                .iter()
                .map(|fill| (self.capacity - fill).powi(2))
                .sum(),
        }
    }
}

impl<M> Evaluator<Vec<usize>, M> for BinPackingEvaluator {
    fn evaluate(&self, solution: &Vec<usize>) -> f64 {
        self.score(solution)
    }

    fn validate(&self, solution: &Vec<usize>) -> Result<()> {
        check_permutation(solution, self.weights.len())
    }
}

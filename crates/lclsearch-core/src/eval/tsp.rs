//! Closed-tour length with incremental deltas.

use crate::array::{ReverseMove, SwapMove};
use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::problem::Evaluator;

use super::check_permutation;

/// Length of the closed tour visiting cities in solution order.
///
/// Edge `k` runs from position `k` to position `k + 1`, wrapping back to the
/// start. Deltas only touch the edges a move actually changes.
#[derive(Debug, Clone)]
pub struct TspEvaluator {
    matrix: DistanceMatrix,
}

impl TspEvaluator {
    pub fn new(matrix: DistanceMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Number of cities a tour must visit.
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    fn tour_length(&self, tour: &[usize]) -> f64 {
        let n = tour.len();
        (0..n)
            .map(|k| self.matrix.get(tour[k], tour[(k + 1) % n]))
            .sum()
    }

    // Sums new minus old length over the given edges, where `city_at` maps a
    // position to the city it holds after the move.
    fn edge_delta(
        &self,
        tour: &[usize],
        mut edges: Vec<usize>,
        city_at: impl Fn(usize) -> usize,
    ) -> f64 {
        let n = tour.len();
        edges.sort_unstable();
        edges.dedup();
        edges
            .into_iter()
            .map(|k| {
                let next = (k + 1) % n;
                self.matrix.get(city_at(k), city_at(next)) - self.matrix.get(tour[k], tour[next])
            })
            .sum()
    }
}

impl Evaluator<Vec<usize>, SwapMove> for TspEvaluator {
    fn evaluate(&self, solution: &Vec<usize>) -> f64 {
        self.tour_length(solution)
    }

    fn delta(&self, solution: &Vec<usize>, mv: &SwapMove) -> Option<f64> {
        let n = solution.len();
        if n < 2 || mv.i == mv.j {
            return Some(0.0);
        }
        let (i, j) = (mv.i, mv.j);
        let edges = vec![(i + n - 1) % n, i, (j + n - 1) % n, j];
        let city_at = |p: usize| {
            if p == i {
                solution[j]
            } else if p == j {
                solution[i]
            } else {
                solution[p]
            }
        };
        Some(self.edge_delta(solution, edges, city_at))
    }

    fn validate(&self, solution: &Vec<usize>) -> Result<()> {
        check_permutation(solution, self.matrix.size())
    }
}

impl Evaluator<Vec<usize>, ReverseMove> for TspEvaluator {
    fn evaluate(&self, solution: &Vec<usize>) -> f64 {
        self.tour_length(solution)
    }

    fn delta(&self, solution: &Vec<usize>, mv: &ReverseMove) -> Option<f64> {
        let n = solution.len();
        if n < 2 || mv.i >= mv.j {
            return Some(0.0);
        }
        let (i, j) = (mv.i, mv.j);
        let before = (i + n - 1) % n;
        // Interior edges keep their length only when distances are symmetric.
        let edges = if self.matrix.is_symmetric() {
            vec![before, j]
        } else {
            std::iter::once(before).chain(i..=j).collect()
        };
        let city_at = |p: usize| {
            if (i..=j).contains(&p) {
                solution[i + j - p]
            } else {
                solution[p]
            }
        };
        Some(self.edge_delta(solution, edges, city_at))
    }

    fn validate(&self, solution: &Vec<usize>) -> Result<()> {
        check_permutation(solution, self.matrix.size())
    }
}

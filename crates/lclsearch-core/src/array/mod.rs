//! Moves and move generators over array (permutation) solutions.
//!
//! Both generators draw index pairs `(i, j)` with `i < j` from
//! `[first, size)`. Tour problems fix `first = 1` so the starting city never
//! moves.

use std::fmt::Debug;

use rand::Rng;

use crate::error::{check_index, LocalSearchError, Result};
use crate::problem::{Move, MoveGenerator};
use crate::rng::{create_rng, resolve_seed, SearchRng};

/// Exchanges the elements at positions `i` and `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapMove {
    pub i: usize,
    pub j: usize,
}

impl SwapMove {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

impl<T: Send> Move<Vec<T>> for SwapMove {
    fn apply(&self, solution: &mut Vec<T>) {
        solution.swap(self.i, self.j);
    }

    fn undo(&self, solution: &mut Vec<T>) {
        solution.swap(self.i, self.j);
    }

    fn validate(&self, solution: &Vec<T>) -> Result<()> {
        check_index(self.i, solution.len())?;
        check_index(self.j, solution.len())
    }
}

/// Reverses the segment `i..=j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReverseMove {
    pub i: usize,
    pub j: usize,
}

impl ReverseMove {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

impl<T: Send> Move<Vec<T>> for ReverseMove {
    fn apply(&self, solution: &mut Vec<T>) {
        solution[self.i..=self.j].reverse();
    }

    fn undo(&self, solution: &mut Vec<T>) {
        solution[self.i..=self.j].reverse();
    }

    fn validate(&self, solution: &Vec<T>) -> Result<()> {
        check_index(self.i, solution.len())?;
        check_index(self.j, solution.len())?;
        if self.i > self.j {
            return Err(LocalSearchError::invalid_parameter(format!(
                "reverse segment start {} is after its end {}",
                self.i, self.j
            )));
        }
        Ok(())
    }
}

/// Shared index-pair sampling for the array generators.
#[derive(Debug, Clone)]
struct PairSampler {
    size: usize,
    first: usize,
    seed: u64,
    rng: SearchRng,
}

impl PairSampler {
    fn new(size: usize, first: usize, seed: Option<u64>) -> Result<Self> {
        if size < first + 2 {
            return Err(LocalSearchError::invalid_parameter(format!(
                "array moves need at least {} positions, got {size}",
                first + 2
            )));
        }
        let seed = resolve_seed(seed);
        Ok(Self {
            size,
            first,
            seed,
            rng: create_rng(Some(seed)),
        })
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len == self.size {
            Ok(())
        } else {
            Err(LocalSearchError::OutOfRange {
                index: len,
                len: self.size,
            })
        }
    }

    fn sample(&mut self) -> (usize, usize) {
        let i = self.rng.random_range(self.first..self.size);
        let mut j = self.rng.random_range(self.first..self.size);
        while i == j {
            j = self.rng.random_range(self.first..self.size);
        }
        (i.min(j), i.max(j))
    }

    fn all_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.first..self.size - 1).flat_map(move |i| (i + 1..self.size).map(move |j| (i, j)))
    }

    fn reset(&mut self) {
        self.rng = create_rng(Some(self.seed));
    }
}

/// Proposes random [`SwapMove`]s.
///
/// # Example
///
/// ```
/// use lclsearch_core::{ArraySwapGenerator, MoveGenerator};
///
/// let mut generator = ArraySwapGenerator::new(5, Some(42)).unwrap();
/// let mv = generator.propose(&vec![0, 1, 2, 3, 4]).unwrap();
/// assert!(mv.i < mv.j && mv.j < 5);
/// ```
#[derive(Debug, Clone)]
pub struct ArraySwapGenerator {
    sampler: PairSampler,
}

impl ArraySwapGenerator {
    /// Swaps over every position of an array of `size` elements.
    pub fn new(size: usize, seed: Option<u64>) -> Result<Self> {
        Ok(Self {
            sampler: PairSampler::new(size, 0, seed)?,
        })
    }

    /// Swaps over positions `1..size`, keeping position 0 in place.
    pub fn fixed_start(size: usize, seed: Option<u64>) -> Result<Self> {
        Ok(Self {
            sampler: PairSampler::new(size, 1, seed)?,
        })
    }

    pub fn size(&self) -> usize {
        self.sampler.size
    }
}

impl<T: Send> MoveGenerator<Vec<T>> for ArraySwapGenerator {
    type Move = SwapMove;

    fn propose(&mut self, solution: &Vec<T>) -> Result<SwapMove> {
        self.sampler.check_len(solution.len())?;
        let (i, j) = self.sampler.sample();
        Ok(SwapMove::new(i, j))
    }

    fn all_moves(&self, solution: &Vec<T>) -> Result<Vec<SwapMove>> {
        self.sampler.check_len(solution.len())?;
        Ok(self
            .sampler
            .all_pairs()
            .map(|(i, j)| SwapMove::new(i, j))
            .collect())
    }

    fn validate(&self, solution: &Vec<T>) -> Result<()> {
        self.sampler.check_len(solution.len())
    }

    fn reset(&mut self) {
        self.sampler.reset();
    }
}

/// Proposes random [`ReverseMove`]s (2-opt style segment reversals).
#[derive(Debug, Clone)]
pub struct ArrayReverseGenerator {
    sampler: PairSampler,
}

impl ArrayReverseGenerator {
    /// Reverses segments anywhere in an array of `size` elements.
    pub fn new(size: usize, seed: Option<u64>) -> Result<Self> {
        Ok(Self {
            sampler: PairSampler::new(size, 0, seed)?,
        })
    }

    /// Reverses segments within positions `1..size`.
    pub fn fixed_start(size: usize, seed: Option<u64>) -> Result<Self> {
        Ok(Self {
            sampler: PairSampler::new(size, 1, seed)?,
        })
    }

    pub fn size(&self) -> usize {
        self.sampler.size
    }
}

impl<T: Send> MoveGenerator<Vec<T>> for ArrayReverseGenerator {
    type Move = ReverseMove;

    fn propose(&mut self, solution: &Vec<T>) -> Result<ReverseMove> {
        self.sampler.check_len(solution.len())?;
        let (i, j) = self.sampler.sample();
        Ok(ReverseMove::new(i, j))
    }

    fn all_moves(&self, solution: &Vec<T>) -> Result<Vec<ReverseMove>> {
        self.sampler.check_len(solution.len())?;
        Ok(self
            .sampler
            .all_pairs()
            .map(|(i, j)| ReverseMove::new(i, j))
            .collect())
    }

    fn validate(&self, solution: &Vec<T>) -> Result<()> {
        self.sampler.check_len(solution.len())
    }

    fn reset(&mut self) {
        self.sampler.reset();
    }
}

//! lclsearch core - Core types and traits for local search
//!
//! This crate provides the building blocks every search driver works with:
//! - The error taxonomy and optimization [`Goal`]
//! - The [`Problem`] contract and its generic [`LocalProblem`] implementation
//! - Array moves and generators for permutation solutions
//! - Tour and bin-packing evaluators with a validated [`DistanceMatrix`]

pub mod array;
pub mod error;
pub mod eval;
pub mod evaluation;
pub mod goal;
pub mod matrix;
pub mod problem;
pub mod rng;

pub use array::{ArrayReverseGenerator, ArraySwapGenerator, ReverseMove, SwapMove};
pub use error::{LocalSearchError, Result};
pub use eval::{BinPackingEvaluator, BinScoring, TspEvaluator};
pub use evaluation::Evaluation;
pub use goal::Goal;
pub use matrix::{DistanceMatrix, MatrixError};
pub use problem::{Evaluator, LocalProblem, Move, MoveGenerator, Problem};
pub use rng::{create_rng, SearchRng};

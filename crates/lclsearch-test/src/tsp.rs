//! Small tour instances.

use lclsearch_core::{
    ArrayReverseGenerator, ArraySwapGenerator, DistanceMatrix, LocalProblem, TspEvaluator,
};

/// Symmetric five-city distances.
pub const FIVE_CITY_ROWS: [[f64; 5]; 5] = [
    [0.0, 2.0, 9.0, 10.0, 7.0],
    [2.0, 0.0, 6.0, 4.0, 3.0],
    [9.0, 6.0, 0.0, 8.0, 5.0],
    [10.0, 4.0, 8.0, 0.0, 6.0],
    [7.0, 3.0, 5.0, 6.0, 0.0],
];

/// Length of the shortest five-city tour, `0 -> 1 -> 3 -> 2 -> 4 -> 0`.
pub const FIVE_CITY_OPTIMUM: f64 = 26.0;

/// Length of the identity tour on the five-city instance.
pub const FIVE_CITY_IDENTITY_LENGTH: f64 = 29.0;

pub fn five_city_matrix() -> DistanceMatrix {
    DistanceMatrix::from_rows(FIVE_CITY_ROWS.iter().map(|row| row.to_vec()).collect())
        .expect("fixture matrix is valid")
}

/// Identity tour over the five-city instance with swap moves that keep
/// city 0 first.
pub fn five_city_problem(seed: u64) -> LocalProblem<Vec<usize>, ArraySwapGenerator, TspEvaluator> {
    let generator = ArraySwapGenerator::fixed_start(5, Some(seed)).expect("five positions");
    LocalProblem::new((0..5).collect(), generator, TspEvaluator::new(five_city_matrix()))
        .expect("fixture problem is valid")
}

/// Same instance, explored with segment reversals.
pub fn five_city_reverse_problem(
    seed: u64,
) -> LocalProblem<Vec<usize>, ArrayReverseGenerator, TspEvaluator> {
    let generator = ArrayReverseGenerator::fixed_start(5, Some(seed)).expect("five positions");
    LocalProblem::new((0..5).collect(), generator, TspEvaluator::new(five_city_matrix()))
        .expect("fixture problem is valid")
}

/// An asymmetric four-city instance.
pub fn asymmetric_matrix() -> DistanceMatrix {
    DistanceMatrix::from_rows(vec![
        vec![0.0, 1.0, 9.0, 4.0],
        vec![3.0, 0.0, 2.0, 7.0],
        vec![5.0, 6.0, 0.0, 1.0],
        vec![2.0, 8.0, 3.0, 0.0],
    ])
    .expect("fixture matrix is valid")
}

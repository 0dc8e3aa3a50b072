use super::*;
use crate::array::{ArrayReverseGenerator, ArraySwapGenerator, ReverseMove, SwapMove};
use crate::error::LocalSearchError;
use crate::eval::TspEvaluator;
use crate::matrix::DistanceMatrix;

fn matrix() -> DistanceMatrix {
    DistanceMatrix::from_rows(vec![
        vec![0.0, 2.0, 9.0, 10.0, 7.0],
        vec![2.0, 0.0, 6.0, 4.0, 3.0],
        vec![9.0, 6.0, 0.0, 8.0, 5.0],
        vec![10.0, 4.0, 8.0, 0.0, 6.0],
        vec![7.0, 3.0, 5.0, 6.0, 0.0],
    ])
    .unwrap()
}

fn tsp_problem() -> LocalProblem<Vec<usize>, ArraySwapGenerator, TspEvaluator> {
    let generator = ArraySwapGenerator::fixed_start(5, Some(11)).unwrap();
    LocalProblem::new(vec![0, 1, 2, 3, 4], generator, TspEvaluator::new(matrix())).unwrap()
}

/// Sums the array and reports a delta that is always wrong.
#[derive(Debug)]
struct MisreportingEvaluator;

impl Evaluator<Vec<usize>, SwapMove> for MisreportingEvaluator {
    fn evaluate(&self, solution: &Vec<usize>) -> f64 {
        solution.iter().enumerate().map(|(p, &x)| (p * x) as f64).sum()
    }

    fn delta(&self, _solution: &Vec<usize>, _mv: &SwapMove) -> Option<f64> {
        Some(100.0)
    }
}

#[test]
fn test_apply_undo_restores_bit_for_bit() {
    let mut problem = tsp_problem();
    let initial = problem.current_value();
    let solution = problem.solution().clone();

    for _ in 0..50 {
        let mv = problem.propose_move().unwrap();
        let eval = problem.apply(&mv).unwrap();
        assert_eq!(eval.value, initial.value + eval.delta);
        problem.undo(&mv).unwrap();
        assert_eq!(problem.current_value().value.to_bits(), initial.value.to_bits());
        assert_eq!(problem.solution(), &solution);
    }
}

#[test]
fn test_incremental_value_tracks_full_recompute() {
    let generator = ArrayReverseGenerator::new(5, Some(3)).unwrap();
    let evaluator = TspEvaluator::new(matrix());
    let mut problem = LocalProblem::new(vec![0, 1, 2, 3, 4], generator, evaluator)
        .unwrap()
        .with_delta_verification(true);

    for _ in 0..100 {
        let mv = problem.propose_move().unwrap();
        problem.apply(&mv).unwrap();
    }
    let full =
        <TspEvaluator as Evaluator<Vec<usize>, ReverseMove>>::evaluate(problem.evaluator(), problem.solution());
    assert!((full - problem.current_value().value).abs() < 1e-9);
}

#[test]
fn test_undo_without_apply_is_invalid_state() {
    let mut problem = tsp_problem();
    let err = problem.undo(&SwapMove::new(1, 2)).unwrap_err();
    assert!(matches!(err, LocalSearchError::InvalidState(_)));

    let mv = problem.propose_move().unwrap();
    problem.apply(&mv).unwrap();
    problem.undo(&mv).unwrap();
    assert!(problem.undo(&mv).is_err());
}

#[test]
fn test_dimension_mismatch_fails_at_construction() {
    let generator = ArraySwapGenerator::new(4, Some(1)).unwrap();
    let err = LocalProblem::new(vec![0, 1, 2, 3], generator, TspEvaluator::new(matrix())).unwrap_err();
    assert_eq!(err, LocalSearchError::OutOfRange { index: 4, len: 5 });
}

#[test]
fn test_repeated_city_fails_at_construction() {
    let generator = ArraySwapGenerator::new(5, Some(1)).unwrap();
    let err = LocalProblem::new(vec![0, 0, 1, 2, 3], generator, TspEvaluator::new(matrix())).unwrap_err();
    assert!(matches!(err, LocalSearchError::InvalidParameter(_)));
}

#[test]
fn test_out_of_range_move_is_rejected() {
    let mut problem = tsp_problem();
    let err = problem.apply(&SwapMove::new(1, 9)).unwrap_err();
    assert_eq!(err, LocalSearchError::OutOfRange { index: 9, len: 5 });
    assert_eq!(problem.solution(), &vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_delta_verification_catches_bad_delta() {
    let generator = ArraySwapGenerator::new(3, Some(5)).unwrap();
    let mut problem = LocalProblem::new(vec![0, 1, 2], generator, MisreportingEvaluator)
        .unwrap()
        .with_delta_verification(true);

    let err = problem.apply(&SwapMove::new(0, 2)).unwrap_err();
    assert!(matches!(err, LocalSearchError::ComputationFailure(_)));
    // the failed move was rolled back
    assert_eq!(problem.solution(), &vec![0, 1, 2]);
    assert_eq!(problem.current_value().value, 5.0);
}

#[test]
fn test_reset_restores_initial_solution_and_moves() {
    let mut problem = tsp_problem();
    let first: Vec<SwapMove> = (0..5)
        .map(|_| {
            let mv = problem.propose_move().unwrap();
            problem.apply(&mv).unwrap();
            mv
        })
        .collect();

    problem.reset();
    assert_eq!(problem.solution(), &vec![0, 1, 2, 3, 4]);
    assert_eq!(problem.current_value().value, 2.0 + 6.0 + 8.0 + 6.0 + 7.0);

    let replay: Vec<SwapMove> = (0..5)
        .map(|_| {
            let mv = problem.propose_move().unwrap();
            problem.apply(&mv).unwrap();
            mv
        })
        .collect();
    assert_eq!(first, replay);
}

#[test]
fn test_neighbourhood_lists_every_pair() {
    let problem = tsp_problem();
    // fixed start: pairs over positions 1..5
    assert_eq!(problem.neighbourhood().unwrap().len(), 6);
}

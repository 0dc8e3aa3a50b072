use lclsearch::prelude::*;
use lclsearch_test::tsp::{five_city_matrix, FIVE_CITY_OPTIMUM};

fn config(toml: &str) -> SolverConfig {
    SolverConfig::from_toml_str(toml).unwrap()
}

#[test]
fn test_solve_tsp_finds_five_city_optimum() {
    lclsearch::logging::init();
    let config = config(
        r#"
        random_seed = 11
        environment_mode = "full_assert"

        [annealing]
        initial_temperature = 10.0
        iterations_per_temperature = 50
        cooling = { type = "geometric", factor = 0.95 }

        [termination]
        max_iterations = 3000
    "#,
    );
    let result = solve_tsp(five_city_matrix(), &config).unwrap();
    assert_eq!(result.best_value(), FIVE_CITY_OPTIMUM);

    let mut tour = result.best_solution().clone();
    assert_eq!(tour[0], 0);
    tour.sort_unstable();
    assert_eq!(tour, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_solve_tsp_rejects_tiny_instances_and_open_ended_runs() {
    let two = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
    let bounded = SolverConfig::new().with_max_iterations(10);
    assert!(matches!(
        solve_tsp(two, &bounded),
        Err(LocalSearchError::InvalidParameter(_))
    ));

    let unbounded = SolverConfig::new().with_random_seed(1);
    assert!(matches!(
        solve_tsp(five_city_matrix(), &unbounded),
        Err(LocalSearchError::InvalidParameter(_))
    ));
}

#[test]
fn test_reproducible_mode_repeats_runs() {
    let config = config(
        r#"
        environment_mode = "reproducible"
        [termination]
        max_iterations = 500
    "#,
    );
    let a = solve_tsp(five_city_matrix(), &config).unwrap();
    let b = solve_tsp(five_city_matrix(), &config).unwrap();
    assert_eq!(a.best_solution(), b.best_solution());
    assert_eq!(a.stats().moves_accepted, b.stats().moves_accepted);
}

#[test]
fn test_steepest_descent_and_annealing_share_the_search_interface() {
    fn run_boxed(search: &mut dyn LocalSearch<Solution = Vec<usize>>) -> f64 {
        search.run().unwrap().best_value()
    }

    let descent_problem = lclsearch_test::tsp::five_city_problem(2);
    let annealing_problem = lclsearch_test::tsp::five_city_problem(2);
    let mut descent = SteepestDescent::new(descent_problem, MaxIterations::new(100).unwrap());
    let mut annealing = SimulatedAnnealing::new(
        annealing_problem,
        GeometricCooling::new(5.0, 0.9).unwrap(),
        ConstantIterations::new(25).unwrap(),
        MaxIterations::new(1_000).unwrap(),
    )
    .with_seed(4);

    let descended = run_boxed(&mut descent);
    let annealed = run_boxed(&mut annealing);
    assert!(descended <= lclsearch_test::tsp::FIVE_CITY_IDENTITY_LENGTH);
    assert!(annealed >= FIVE_CITY_OPTIMUM);
}

#[test]
fn test_bin_packing_runs_through_the_generic_problem() {
    let weights = vec![4.0, 8.0, 1.0, 4.0, 2.0, 1.0, 7.0, 3.0];
    let evaluator = BinPackingEvaluator::new(weights.clone(), 10.0, BinScoring::BinCount).unwrap();
    let generator = ArraySwapGenerator::new(weights.len(), Some(8)).unwrap();
    let problem = LocalProblem::new((0..weights.len()).collect(), generator, evaluator).unwrap();
    let initial = problem.current_value().value;

    let mut sa = SimulatedAnnealing::new(
        problem,
        GeometricCooling::new(2.0, 0.9).unwrap(),
        ConstantIterations::new(20).unwrap(),
        MaxIterations::new(2_000).unwrap(),
    )
    .with_seed(8);
    let result = sa.run().unwrap();
    // 30 units of weight need at least three bins
    assert!(result.best_value() >= 3.0);
    assert!(result.best_value() <= initial);
}

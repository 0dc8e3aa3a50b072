//! Tests for simulated annealing.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lclsearch_core::{Evaluation, Goal, LocalSearchError, Problem, Result};
use lclsearch_test::tsp::{five_city_problem, five_city_reverse_problem, FIVE_CITY_OPTIMUM};
use lclsearch_test::ScriptedProblem;
use proptest::prelude::*;

use super::*;
use crate::clock::ManualClock;
use crate::cooling::{CoolingSchedule, GeometricCooling};
use crate::termination::TerminationCriterion;
use crate::iterations::ConstantIterations;
use crate::termination::{
    External, MaxIterations, MaxSeconds, MinTemperature, MultiCriterion, NoImprovement,
    StopReason,
};

/// A schedule stuck at zero degrees.
#[derive(Debug)]
struct Frozen;

impl CoolingSchedule for Frozen {
    fn initial_temperature(&self) -> f64 {
        0.0
    }

    fn temperature(&self) -> f64 {
        0.0
    }

    fn next(&self, _temperature: f64) -> f64 {
        0.0
    }

    fn advance(&mut self) -> f64 {
        0.0
    }

    fn reset(&mut self) {}
}

/// A scripted problem that runs a hook after every successful apply.
struct Hooked {
    inner: ScriptedProblem,
    hook: Box<dyn FnMut(usize) + Send>,
}

impl Hooked {
    fn new(inner: ScriptedProblem, hook: impl FnMut(usize) + Send + 'static) -> Self {
        Self {
            inner,
            hook: Box::new(hook),
        }
    }
}

impl fmt::Debug for Hooked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooked").field("inner", &self.inner).finish()
    }
}

impl Problem for Hooked {
    type Solution = f64;
    type Move = <ScriptedProblem as Problem>::Move;

    fn propose_move(&mut self) -> Result<Self::Move> {
        self.inner.propose_move()
    }

    fn apply(&mut self, mv: &Self::Move) -> Result<Evaluation> {
        let evaluation = self.inner.apply(mv)?;
        (self.hook)(self.inner.applies());
        Ok(evaluation)
    }

    fn undo(&mut self, mv: &Self::Move) -> Result<()> {
        self.inner.undo(mv)
    }

    fn current_value(&self) -> Evaluation {
        self.inner.current_value()
    }

    fn solution(&self) -> &f64 {
        self.inner.solution()
    }

    fn neighbourhood(&self) -> Result<Vec<Self::Move>> {
        self.inner.neighbourhood()
    }

    fn reset(&mut self) {
        self.inner.reset()
    }
}

fn scripted(
    initial: f64,
    script: Vec<f64>,
    temperature: f64,
    limit: u64,
) -> SimulatedAnnealing<ScriptedProblem, GeometricCooling, ConstantIterations> {
    SimulatedAnnealing::new(
        ScriptedProblem::new(initial, script),
        GeometricCooling::new(temperature, 0.99).unwrap(),
        ConstantIterations::new(100).unwrap(),
        MaxIterations::new(limit).unwrap(),
    )
    .with_seed(42)
}

#[test]
fn test_scenario_d_acceptance_bounds() {
    for (delta, temperature) in [(0.5, 1.0), (3.0, 10.0), (100.0, 2.0), (0.0, 5.0)] {
        let p = acceptance_probability(delta, temperature);
        assert_eq!(p, (-delta / temperature).exp().clamp(0.0, 1.0));
        assert!((0.0..=1.0).contains(&p));
    }
    for temperature in [1e-300, 1.0, 1e300] {
        assert_eq!(acceptance_probability(-1e-12, temperature), 1.0);
        assert_eq!(acceptance_probability(-1e300, temperature), 1.0);
    }
    // no overflow for huge ratios
    assert_eq!(acceptance_probability(1e300, 1e-300), 0.0);
}

#[test]
fn test_frozen_temperature_accepts_only_strict_improvements() {
    for temperature in [0.0, -1.0, f64::MIN_POSITIVE / 2.0, f64::NAN, f64::INFINITY] {
        assert!(is_frozen(temperature));
        assert_eq!(acceptance_probability(0.0, temperature), 0.0);
        assert_eq!(acceptance_probability(1.0, temperature), 0.0);
        assert_eq!(acceptance_probability(-1.0, temperature), 1.0);
    }
    assert!(!is_frozen(1e-300));

    let mut sa = SimulatedAnnealing::new(
        ScriptedProblem::new(10.0, vec![11.0, 10.0, 9.0, 9.0, 12.0, 8.0]),
        Frozen,
        ConstantIterations::new(3).unwrap(),
        MaxIterations::new(6).unwrap(),
    );
    let result = sa.run().unwrap();
    assert_eq!(result.best_value(), 8.0);
    assert_eq!(result.stats().moves_accepted, 2);
    assert_eq!(sa.problem().undos(), 4);
}

#[test]
fn test_scenario_e_best_survives_worsening_moves() {
    let mut sa = scripted(10.0, vec![5.0, 9.0, 7.0, 12.0, 6.0, 11.0], 1e9, 6);
    let result = sa.run().unwrap();

    // every move was accepted, so the working solution ends worse than the best
    assert_eq!(result.stats().moves_accepted, 6);
    assert_eq!(*sa.problem().solution(), 11.0);
    assert_eq!(result.best_value(), 5.0);
    assert_eq!(*result.best_solution(), 5.0);

    let history = result.history().unwrap();
    assert!(history.iter().all(|point| result.best_value() <= point.current));
    assert!(history.windows(2).all(|w| w[1].best <= w[0].best));
}

#[test]
fn test_maximize_tracks_largest_value() {
    let mut sa = SimulatedAnnealing::new(
        ScriptedProblem::new(0.0, vec![1.0, 3.0, 2.0]),
        Frozen,
        ConstantIterations::new(10).unwrap(),
        MaxIterations::new(3).unwrap(),
    )
    .with_goal(Goal::Maximize);
    let result = sa.run().unwrap();
    assert_eq!(result.best_value(), 3.0);
    assert_eq!(result.stats().moves_accepted, 2);
}

#[test]
fn test_cooling_advances_after_each_full_budget() {
    let mut sa = SimulatedAnnealing::new(
        ScriptedProblem::new(1.0, vec![1.0]),
        GeometricCooling::new(8.0, 0.5).unwrap(),
        ConstantIterations::new(10).unwrap(),
        MaxIterations::new(25).unwrap(),
    );
    let result = sa.run().unwrap();
    assert_eq!(result.iterations(), 25);
    assert_eq!(result.stats().temperature_steps, 2);
    assert_eq!(result.final_temperature(), Some(2.0));
}

#[test]
fn test_stop_reason_names_the_child() {
    let termination = MultiCriterion::new(vec![
        MaxIterations::new(1_000).unwrap().into(),
        NoImprovement::new(3, Goal::Minimize).unwrap().into(),
    ]);
    let mut sa = SimulatedAnnealing::new(
        ScriptedProblem::new(5.0, vec![5.0]),
        GeometricCooling::new(1.0, 0.5).unwrap(),
        ConstantIterations::new(2).unwrap(),
        termination,
    );
    let result = sa.run().unwrap();
    // the first value sets the best, three stagnant values follow
    assert_eq!(result.iterations(), 4);
    assert_eq!(
        result.stop_reason(),
        &StopReason::MultiCriterion {
            index: 1,
            reason: Box::new(StopReason::NoImprovement { patience: 3 }),
        }
    );
    assert_eq!(sa.state(), &OptimizerState::Terminated(result.stop_reason().clone()));
}

#[test]
fn test_min_temperature_stops_after_cooling() {
    let termination = MultiCriterion::new(vec![
        MaxIterations::new(1_000).unwrap().into(),
        MinTemperature::new(1.5).unwrap().into(),
    ]);
    let mut sa = SimulatedAnnealing::new(
        ScriptedProblem::new(1.0, vec![1.0]),
        GeometricCooling::new(8.0, 0.5).unwrap(),
        ConstantIterations::new(10).unwrap(),
        termination,
    );
    let result = sa.run().unwrap();
    // 8 -> 4 -> 2 -> 1
    assert_eq!(result.iterations(), 30);
    assert_eq!(result.stats().temperature_steps, 3);
    assert_eq!(result.final_temperature(), Some(1.0));
    assert_eq!(
        result.stop_reason(),
        &StopReason::MultiCriterion {
            index: 1,
            reason: Box::new(StopReason::MinTemperature { limit: 1.5 }),
        }
    );
}

#[test]
fn test_external_cancel_survives_lowered_flag() {
    let flag = Arc::new(AtomicBool::new(false));
    let raise = Arc::clone(&flag);
    let problem = Hooked::new(ScriptedProblem::new(1.0, vec![2.0, 0.5]), move |applies| {
        if applies == 3 {
            raise.store(true, Ordering::SeqCst);
        }
    });
    let mut sa = SimulatedAnnealing::new(
        problem,
        GeometricCooling::new(1.0, 0.5).unwrap(),
        ConstantIterations::new(5).unwrap(),
        MultiCriterion::new(vec![
            MaxIterations::new(100).unwrap().into(),
            External::new(Arc::clone(&flag)).into(),
        ]),
    );
    let result = sa.run().unwrap();
    assert_eq!(result.iterations(), 3);
    assert_eq!(result.stop_reason().leaf(), &StopReason::External);

    flag.store(false, Ordering::SeqCst);
    assert_eq!(sa.state(), &OptimizerState::Terminated(result.stop_reason().clone()));
    assert!(!sa.termination().keep_running());
    assert!(matches!(sa.run(), Err(LocalSearchError::InvalidState(_))));
}

#[test]
fn test_stop_reason_is_taken_when_the_loop_stops() {
    let clock = Arc::new(ManualClock::new());
    let ticking = Arc::clone(&clock);
    let problem = Hooked::new(ScriptedProblem::new(1.0, vec![1.0]), move |_| {
        ticking.advance(Duration::from_millis(100));
    });
    let mut sa = SimulatedAnnealing::new(
        problem,
        GeometricCooling::new(1.0, 0.5).unwrap(),
        ConstantIterations::new(4).unwrap(),
        MultiCriterion::new(vec![
            MaxSeconds::with_clock(Duration::from_secs(1), clock.clone())
                .unwrap()
                .into(),
            MaxIterations::new(9).unwrap().into(),
        ]),
    );
    let result = sa.run().unwrap();
    clock.advance(Duration::from_secs(5));

    let expected = StopReason::MultiCriterion {
        index: 1,
        reason: Box::new(StopReason::MaxIterations { limit: 9 }),
    };
    assert_eq!(result.iterations(), 9);
    assert_eq!(result.stop_reason(), &expected);
    assert_eq!(sa.state(), &OptimizerState::Terminated(expected));
}

#[test]
fn test_run_without_reset_is_invalid_state() {
    let mut sa = scripted(1.0, vec![2.0], 1.0, 5);
    sa.run().unwrap();
    let err = sa.run().unwrap_err();
    assert!(matches!(err, LocalSearchError::InvalidState(_)));

    sa.reset();
    assert_eq!(sa.state(), &OptimizerState::Initialized);
    assert!(sa.run().is_ok());
}

#[test]
fn test_collaborator_error_fails_the_run() {
    let mut sa = SimulatedAnnealing::new(
        ScriptedProblem::new(1.0, vec![2.0, 0.5]).failing_at(3),
        GeometricCooling::new(1.0, 0.5).unwrap(),
        ConstantIterations::new(2).unwrap(),
        MaxIterations::new(10).unwrap(),
    );
    let err = sa.run().unwrap_err();
    assert_eq!(err, LocalSearchError::computation_failure("scripted failure"));
    assert_eq!(sa.state(), &OptimizerState::Failed);
    assert!(matches!(sa.run(), Err(LocalSearchError::InvalidState(_))));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let build = || {
        SimulatedAnnealing::new(
            five_city_reverse_problem(5),
            GeometricCooling::new(20.0, 0.9).unwrap(),
            ConstantIterations::new(20).unwrap(),
            MaxIterations::new(400).unwrap(),
        )
        .with_seed(99)
    };
    let mut first = build();
    let mut second = build();
    let a = first.run().unwrap();
    let b = second.run().unwrap();
    assert_eq!(a.best_solution(), b.best_solution());
    assert_eq!(a.stats().moves_accepted, b.stats().moves_accepted);

    first.reset();
    let c = first.run().unwrap();
    assert_eq!(a.best_solution(), c.best_solution());
    assert_eq!(a.stats().moves_accepted, c.stats().moves_accepted);
    let values = |r: &crate::result::RunResult<Vec<usize>>| {
        r.history()
            .unwrap()
            .iter()
            .map(|p| (p.iteration, p.best, p.current))
            .collect::<Vec<_>>()
    };
    assert_eq!(values(&a), values(&c));
}

#[test]
fn test_finds_five_city_optimum() {
    let mut sa = SimulatedAnnealing::new(
        five_city_problem(1),
        GeometricCooling::new(10.0, 0.95).unwrap(),
        ConstantIterations::new(50).unwrap(),
        MaxIterations::new(3_000).unwrap(),
    )
    .with_seed(1)
    .with_history(false);
    let result = sa.run().unwrap();
    assert_eq!(result.best_value(), FIVE_CITY_OPTIMUM);
    assert_eq!(result.best_solution()[0], 0);
    assert!(result.history().is_none());
}

proptest! {
    #[test]
    fn prop_acceptance_is_a_probability(
        worsening in -1e6f64..1e6,
        temperature in 1e-9f64..1e9,
    ) {
        let p = acceptance_probability(worsening, temperature);
        prop_assert!((0.0..=1.0).contains(&p));
        if worsening < 0.0 {
            prop_assert_eq!(p, 1.0);
        } else {
            prop_assert_eq!(p, (-worsening / temperature).exp());
        }
    }

    #[test]
    fn prop_best_is_never_worse_than_any_visited_value(
        initial in -100i32..100,
        script in prop::collection::vec(-100i32..100, 1..30),
        temperature in 0.1f64..100.0,
        seed in any::<u64>(),
    ) {
        let script: Vec<f64> = script.into_iter().map(f64::from).collect();
        let mut sa = SimulatedAnnealing::new(
            ScriptedProblem::new(f64::from(initial), script.clone()),
            GeometricCooling::new(temperature, 0.9).unwrap(),
            ConstantIterations::new(5).unwrap(),
            MaxIterations::new(60).unwrap(),
        )
        .with_seed(seed);
        let result = sa.run().unwrap();

        prop_assert_eq!(*result.best_solution(), result.best_value());
        prop_assert!(result.best_value() <= f64::from(initial));
        prop_assert!(result.best_value() <= *sa.problem().solution());
        for point in result.history().unwrap() {
            prop_assert!(result.best_value() <= point.current);
        }
        prop_assert!(script.contains(&result.best_value()) || result.best_value() == f64::from(initial));
    }
}

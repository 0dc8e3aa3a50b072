//! Cooling schedules for simulated annealing.
//!
//! A schedule owns the temperature. The optimizer reads it and asks the
//! schedule to advance after every temperature step.

use std::fmt::Debug;

use lclsearch_core::{LocalSearchError, Result};

/// Produces the next temperature from the current one.
///
/// Temperatures stay strictly positive: the built-in schedules never go
/// below [`MIN_TEMPERATURE`], which the acceptance test treats as frozen.
pub trait CoolingSchedule: Send + Debug {
    /// The temperature the schedule starts from and returns to on reset.
    fn initial_temperature(&self) -> f64;

    /// The current temperature.
    fn temperature(&self) -> f64;

    /// The temperature that follows `temperature`. Pure.
    fn next(&self, temperature: f64) -> f64;

    /// Moves to the next temperature and returns it.
    fn advance(&mut self) -> f64;

    /// Restores the initial temperature.
    fn reset(&mut self);
}

/// Floor of every built-in schedule.
pub const MIN_TEMPERATURE: f64 = f64::MIN_POSITIVE;

fn check_initial(initial: f64) -> Result<()> {
    if initial.is_finite() && initial > 0.0 {
        Ok(())
    } else {
        Err(LocalSearchError::invalid_parameter(format!(
            "initial temperature must be positive and finite, got {initial}"
        )))
    }
}

/// Geometric cooling: `T <- T * factor`.
///
/// # Example
///
/// ```
/// use lclsearch_solver::cooling::{CoolingSchedule, GeometricCooling};
///
/// let mut cooling = GeometricCooling::new(100.0, 0.5).unwrap();
/// assert_eq!(cooling.advance(), 50.0);
/// assert_eq!(cooling.advance(), 25.0);
/// cooling.reset();
/// assert_eq!(cooling.temperature(), 100.0);
///
/// assert!(GeometricCooling::new(100.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct GeometricCooling {
    initial: f64,
    factor: f64,
    current: f64,
}

impl GeometricCooling {
    /// Fails unless `0 < factor < 1` and `initial` is positive and finite.
    pub fn new(initial: f64, factor: f64) -> Result<Self> {
        check_initial(initial)?;
        if !(factor > 0.0 && factor < 1.0) {
            return Err(LocalSearchError::invalid_parameter(format!(
                "geometric cooling factor must lie strictly between 0 and 1, got {factor}"
            )));
        }
        Ok(Self {
            initial,
            factor,
            current: initial,
        })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl CoolingSchedule for GeometricCooling {
    fn initial_temperature(&self) -> f64 {
        self.initial
    }

    fn temperature(&self) -> f64 {
        self.current
    }

    fn next(&self, temperature: f64) -> f64 {
        (temperature * self.factor).max(MIN_TEMPERATURE)
    }

    fn advance(&mut self) -> f64 {
        self.current = self.next(self.current);
        self.current
    }

    fn reset(&mut self) {
        self.current = self.initial;
    }
}

/// Lundy-Mees cooling: `T <- T / (1 + beta * T)`.
///
/// Cools quickly at high temperatures and slowly near zero.
#[derive(Debug, Clone)]
pub struct LundyMeesCooling {
    initial: f64,
    beta: f64,
    current: f64,
}

impl LundyMeesCooling {
    /// Fails unless `beta` and `initial` are positive and finite.
    pub fn new(initial: f64, beta: f64) -> Result<Self> {
        check_initial(initial)?;
        if !(beta.is_finite() && beta > 0.0) {
            return Err(LocalSearchError::invalid_parameter(format!(
                "Lundy-Mees beta must be positive and finite, got {beta}"
            )));
        }
        Ok(Self {
            initial,
            beta,
            current: initial,
        })
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl CoolingSchedule for LundyMeesCooling {
    fn initial_temperature(&self) -> f64 {
        self.initial
    }

    fn temperature(&self) -> f64 {
        self.current
    }

    fn next(&self, temperature: f64) -> f64 {
        (temperature / (1.0 + self.beta * temperature)).max(MIN_TEMPERATURE)
    }

    fn advance(&mut self) -> f64 {
        self.current = self.next(self.current);
        self.current
    }

    fn reset(&mut self) {
        self.current = self.initial;
    }
}

impl<C: CoolingSchedule + ?Sized> CoolingSchedule for Box<C> {
    fn initial_temperature(&self) -> f64 {
        (**self).initial_temperature()
    }

    fn temperature(&self) -> f64 {
        (**self).temperature()
    }

    fn next(&self, temperature: f64) -> f64 {
        (**self).next(temperature)
    }

    fn advance(&mut self) -> f64 {
        (**self).advance()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

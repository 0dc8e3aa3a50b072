//! Time-based termination.

use std::sync::Arc;
use std::time::Duration;

use lclsearch_core::{LocalSearchError, Result};

use super::{lifecycle, CriterionState, StopReason, TerminationCriterion};
use crate::clock::{Clock, MonotonicClock};

/// Keeps running while less than `limit` has elapsed since `start_timing`.
///
/// Before `start_timing` the elapsed time is zero.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use lclsearch_solver::clock::ManualClock;
/// use lclsearch_solver::termination::{MaxSeconds, TerminationCriterion};
///
/// let clock = Arc::new(ManualClock::new());
/// let mut term = MaxSeconds::with_clock(Duration::from_secs(3), clock.clone()).unwrap();
/// term.start_timing();
/// clock.advance(Duration::from_secs(2));
/// assert!(term.keep_running());
/// clock.advance(Duration::from_secs(1));
/// assert!(!term.keep_running());
/// ```
#[derive(Debug, Clone)]
pub struct MaxSeconds {
    limit: Duration,
    clock: Arc<dyn Clock>,
    started_at: Option<Duration>,
}

impl MaxSeconds {
    /// Fails if `limit` is zero.
    pub fn new(limit: Duration) -> Result<Self> {
        Self::with_clock(limit, MonotonicClock::shared())
    }

    pub fn seconds(secs: u64) -> Result<Self> {
        Self::new(Duration::from_secs(secs))
    }

    pub fn millis(ms: u64) -> Result<Self> {
        Self::new(Duration::from_millis(ms))
    }

    /// Reads time from `clock` instead of the system monotonic clock.
    pub fn with_clock(limit: Duration, clock: Arc<dyn Clock>) -> Result<Self> {
        if limit.is_zero() {
            return Err(LocalSearchError::invalid_parameter(
                "time limit must be greater than zero",
            ));
        }
        Ok(Self {
            limit,
            clock,
            started_at: None,
        })
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Time since `start_timing`, or zero before it.
    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|start| self.clock.now().saturating_sub(start))
            .unwrap_or_default()
    }

    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }
}

impl TerminationCriterion for MaxSeconds {
    fn start_timing(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(self.clock.now());
        }
    }

    fn keep_running(&self) -> bool {
        self.elapsed() < self.limit
    }

    fn iteration_done(&mut self) {}

    fn check_new_value(&mut self, _value: f64) {}

    fn reset(&mut self) {
        self.started_at = None;
    }

    fn state(&self) -> CriterionState {
        lifecycle(self.started_at.is_some(), self.keep_running())
    }

    fn stop_reason(&self) -> Option<StopReason> {
        (!self.keep_running()).then_some(StopReason::MaxSeconds { limit: self.limit })
    }
}

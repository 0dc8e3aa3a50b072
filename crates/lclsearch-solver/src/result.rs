//! The outcome of a completed run.

use std::time::Duration;

use crate::stats::RunStats;
use crate::termination::StopReason;

/// One point of a run's improvement trace.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryPoint {
    pub elapsed: Duration,
    pub best: f64,
    pub current: f64,
    pub iteration: u64,
}

/// Best solution found by a run, with a summary of how the run went.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult<S> {
    best_solution: S,
    best_value: f64,
    stop_reason: StopReason,
    final_temperature: Option<f64>,
    stats: RunStats,
    history: Option<Vec<HistoryPoint>>,
}

impl<S> RunResult<S> {
    pub(crate) fn new(
        best_solution: S,
        best_value: f64,
        stop_reason: StopReason,
        final_temperature: Option<f64>,
        stats: RunStats,
        history: Option<Vec<HistoryPoint>>,
    ) -> Self {
        Self {
            best_solution,
            best_value,
            stop_reason,
            final_temperature,
            stats,
            history,
        }
    }

    pub fn best_solution(&self) -> &S {
        &self.best_solution
    }

    pub fn into_best_solution(self) -> S {
        self.best_solution
    }

    pub fn best_value(&self) -> f64 {
        self.best_value
    }

    /// Total attempts made.
    pub fn iterations(&self) -> u64 {
        self.stats.iterations
    }

    pub fn stop_reason(&self) -> &StopReason {
        &self.stop_reason
    }

    /// Temperature when the run stopped. `None` for drivers without one.
    pub fn final_temperature(&self) -> Option<f64> {
        self.final_temperature
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Improvement trace, if the run recorded one.
    pub fn history(&self) -> Option<&[HistoryPoint]> {
        self.history.as_deref()
    }
}

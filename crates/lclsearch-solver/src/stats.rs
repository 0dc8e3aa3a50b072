//! Run statistics.

use std::time::Duration;

/// Counters collected over one run.
///
/// # Example
///
/// ```
/// use lclsearch_solver::stats::RunStats;
///
/// let mut stats = RunStats::default();
/// stats.record_move(true);
/// stats.record_move(false);
/// stats.record_improvement();
///
/// assert_eq!(stats.moves_evaluated, 2);
/// assert_eq!(stats.moves_accepted, 1);
/// assert_eq!(stats.acceptance_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// Completed loop iterations.
    pub iterations: u64,
    /// Moves applied and resolved, accepted or not.
    pub moves_evaluated: u64,
    /// Moves kept.
    pub moves_accepted: u64,
    /// Times the best value improved.
    pub improvements: u64,
    /// Times the temperature was lowered.
    pub temperature_steps: u64,
    /// Iterations made at the current temperature.
    pub iterations_at_temperature: u64,
    /// Iterations since the best value last improved.
    pub iterations_since_best: u64,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl RunStats {
    /// Records a move evaluation and whether it was accepted.
    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
    }

    /// Records a completed iteration.
    pub fn record_iteration(&mut self) {
        self.iterations += 1;
        self.iterations_at_temperature += 1;
        self.iterations_since_best += 1;
    }

    /// Records a new best value.
    pub fn record_improvement(&mut self) {
        self.improvements += 1;
        self.iterations_since_best = 0;
    }

    /// Records a cooling step.
    pub fn record_temperature_step(&mut self) {
        self.temperature_steps += 1;
        self.iterations_at_temperature = 0;
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }

    /// Returns the moves per second rate.
    pub fn moves_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.moves_evaluated as f64 / secs
        } else {
            0.0
        }
    }
}

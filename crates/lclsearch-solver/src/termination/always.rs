//! A criterion that never stops.

use super::{lifecycle, CriterionState, StopReason, TerminationCriterion};

/// Always keeps running.
///
/// Useful as a neutral child of a composite, or with a driver that stops on
/// its own, such as steepest descent at a local optimum.
#[derive(Debug, Clone, Default)]
pub struct AlwaysRun {
    started: bool,
}

impl AlwaysRun {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TerminationCriterion for AlwaysRun {
    fn start_timing(&mut self) {
        self.started = true;
    }

    fn keep_running(&self) -> bool {
        true
    }

    fn iteration_done(&mut self) {
        self.started = true;
    }

    fn check_new_value(&mut self, _value: f64) {
        self.started = true;
    }

    fn reset(&mut self) {
        self.started = false;
    }

    fn state(&self) -> CriterionState {
        lifecycle(self.started, true)
    }

    fn stop_reason(&self) -> Option<StopReason> {
        None
    }
}

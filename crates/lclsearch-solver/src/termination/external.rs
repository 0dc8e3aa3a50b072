//! External termination via AtomicBool flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{lifecycle, CriterionState, StopReason, TerminationCriterion};

/// Terminates when an external flag is set.
///
/// Allows code outside the loop, typically another thread, to cancel a run.
/// A raised flag is latched the first time the criterion sees it, so
/// lowering the flag again does not resume the run. `reset` clears the latch
/// and lowers the flag.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use lclsearch_solver::termination::{External, TerminationCriterion};
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let term = External::new(flag.clone());
/// assert!(term.keep_running());
///
/// flag.store(true, Ordering::SeqCst);
/// assert!(!term.keep_running());
/// flag.store(false, Ordering::SeqCst);
/// assert!(!term.keep_running());
/// ```
#[derive(Debug)]
pub struct External {
    flag: Arc<AtomicBool>,
    started: bool,
    cancelled: AtomicBool,
}

impl External {
    /// Creates a termination that checks the given flag.
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self {
            flag,
            started: false,
            cancelled: AtomicBool::new(false),
        }
    }

    /// A handle that cancels the run when set.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    fn cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::Acquire) {
            return true;
        }
        let raised = self.flag.load(Ordering::SeqCst);
        if raised {
            self.cancelled.store(true, Ordering::Release);
        }
        raised
    }
}

impl Clone for External {
    fn clone(&self) -> Self {
        Self {
            flag: Arc::clone(&self.flag),
            started: self.started,
            cancelled: AtomicBool::new(self.cancelled.load(Ordering::Acquire)),
        }
    }
}

impl TerminationCriterion for External {
    fn start_timing(&mut self) {
        self.started = true;
        self.cancelled();
    }

    fn keep_running(&self) -> bool {
        !self.cancelled()
    }

    fn iteration_done(&mut self) {
        self.started = true;
        self.cancelled();
    }

    fn check_new_value(&mut self, _value: f64) {
        self.started = true;
    }

    fn reset(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
        self.started = false;
        self.cancelled.store(false, Ordering::Release);
    }

    fn state(&self) -> CriterionState {
        lifecycle(self.started, self.keep_running())
    }

    fn stop_reason(&self) -> Option<StopReason> {
        self.cancelled().then_some(StopReason::External)
    }
}

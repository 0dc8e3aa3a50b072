//! Termination criteria for search runs.
//!
//! Every criterion follows the same lifecycle: it starts `Initialized`,
//! becomes `Running` once the loop touches it, and latches `Terminated` the
//! first time it refuses to keep running. Only [`reset`] leaves `Terminated`.
//!
//! [`Termination`] is the closed set of criteria a driver accepts. Several
//! criteria combine through [`MultiCriterion`], which stops as soon as any
//! child stops, or through [`AnyCriterion`], which stops once every child
//! has stopped.
//!
//! [`reset`]: TerminationCriterion::reset

mod always;
mod composite;
mod external;
mod max_iterations;
mod temperature;
mod time;
mod unimproved;

use std::fmt::{self, Debug};

pub use always::AlwaysRun;
pub use composite::{AnyCriterion, MultiCriterion};
pub use external::External;
pub use max_iterations::MaxIterations;
pub use temperature::MinTemperature;
pub use time::MaxSeconds;
pub use unimproved::{MustImprove, NoImprovement};

/// Lifecycle state of a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionState {
    Initialized,
    Running,
    Terminated,
}

/// Why a run stopped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum StopReason {
    MaxIterations { limit: u64 },
    MaxSeconds { limit: std::time::Duration },
    NoImprovement { patience: u64 },
    MustImprove,
    External,
    MinTemperature { limit: f64 },
    /// Child `index` of a [`MultiCriterion`] stopped for `reason`.
    MultiCriterion {
        index: usize,
        reason: Box<StopReason>,
    },
    /// Every child of an [`AnyCriterion`] stopped, in child order.
    AnyCriterion { reasons: Vec<StopReason> },
    /// The driver ran out of work before any criterion fired.
    LocalOptimum,
    /// Every neighbour of the current solution was tabu.
    NoAdmissibleMove,
}

impl StopReason {
    /// The innermost leaf reason, looking through composites.
    ///
    /// For an [`AnyCriterion`] this follows the first child.
    pub fn leaf(&self) -> &StopReason {
        match self {
            StopReason::MultiCriterion { reason, .. } => reason.leaf(),
            StopReason::AnyCriterion { reasons } => {
                reasons.first().map_or(self, |reason| reason.leaf())
            }
            other => other,
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::MaxIterations { limit } => write!(f, "reached {limit} iterations"),
            StopReason::MaxSeconds { limit } => write!(f, "reached time limit of {limit:?}"),
            StopReason::NoImprovement { patience } => {
                write!(f, "no improvement in {patience} iterations")
            }
            StopReason::MustImprove => f.write_str("value did not improve"),
            StopReason::External => f.write_str("cancelled externally"),
            StopReason::MinTemperature { limit } => {
                write!(f, "temperature fell to {limit} or below")
            }
            StopReason::MultiCriterion { index, reason } => {
                write!(f, "criterion #{index}: {reason}")
            }
            StopReason::AnyCriterion { reasons } => {
                f.write_str("all criteria stopped")?;
                for (index, reason) in reasons.iter().enumerate() {
                    let sep = if index == 0 { ": " } else { "; " };
                    write!(f, "{sep}{reason}")?;
                }
                Ok(())
            }
            StopReason::LocalOptimum => f.write_str("reached a local optimum"),
            StopReason::NoAdmissibleMove => f.write_str("no admissible move left"),
        }
    }
}

/// The capability set every termination criterion implements.
///
/// The driver calls [`start_timing`] once, then before every attempt asks
/// [`keep_running`]. After each attempt it reports the current value through
/// [`check_new_value`] and then calls [`iteration_done`]. Drivers with a
/// temperature report every new temperature through [`check_temperature`].
///
/// [`start_timing`]: TerminationCriterion::start_timing
/// [`keep_running`]: TerminationCriterion::keep_running
/// [`check_new_value`]: TerminationCriterion::check_new_value
/// [`iteration_done`]: TerminationCriterion::iteration_done
/// [`check_temperature`]: TerminationCriterion::check_temperature
pub trait TerminationCriterion: Send + Debug {
    /// Captures any wall-clock baseline. Idempotent while running.
    fn start_timing(&mut self);

    /// Returns true if the loop may continue. Never advances a counter.
    fn keep_running(&self) -> bool;

    /// Records one completed attempt.
    fn iteration_done(&mut self);

    /// Offers the latest objective value.
    fn check_new_value(&mut self, value: f64);

    /// Offers the temperature the driver just cooled to.
    fn check_temperature(&mut self, _temperature: f64) {}

    /// Returns to the freshly constructed state.
    fn reset(&mut self);

    fn state(&self) -> CriterionState;

    /// Why the criterion stopped, or `None` while it keeps running.
    fn stop_reason(&self) -> Option<StopReason>;
}

/// Derives the lifecycle state from a start flag and `keep_running`.
pub(crate) fn lifecycle(started: bool, keep_running: bool) -> CriterionState {
    match (started, keep_running) {
        (_, false) => CriterionState::Terminated,
        (true, true) => CriterionState::Running,
        (false, true) => CriterionState::Initialized,
    }
}

/// Any supported termination criterion.
///
/// # Example
///
/// ```
/// use lclsearch_core::Goal;
/// use lclsearch_solver::termination::{
///     MaxIterations, MaxSeconds, MultiCriterion, NoImprovement, Termination, TerminationCriterion,
/// };
///
/// let mut termination = Termination::from(MultiCriterion::new(vec![
///     MaxSeconds::seconds(60).unwrap().into(),
///     MaxIterations::new(10_000).unwrap().into(),
///     NoImprovement::new(500, Goal::Minimize).unwrap().into(),
/// ]));
///
/// termination.start_timing();
/// assert!(termination.keep_running());
/// ```
#[derive(Debug, Clone)]
pub enum Termination {
    MaxIterations(MaxIterations),
    MaxSeconds(MaxSeconds),
    NoImprovement(NoImprovement),
    MustImprove(MustImprove),
    External(External),
    MinTemperature(MinTemperature),
    AlwaysRun(AlwaysRun),
    Multi(MultiCriterion),
    Any(AnyCriterion),
}

macro_rules! delegate {
    ($self:ident, $criterion:ident => $body:expr) => {
        match $self {
            Termination::MaxIterations($criterion) => $body,
            Termination::MaxSeconds($criterion) => $body,
            Termination::NoImprovement($criterion) => $body,
            Termination::MustImprove($criterion) => $body,
            Termination::External($criterion) => $body,
            Termination::MinTemperature($criterion) => $body,
            Termination::AlwaysRun($criterion) => $body,
            Termination::Multi($criterion) => $body,
            Termination::Any($criterion) => $body,
        }
    };
}

impl TerminationCriterion for Termination {
    fn start_timing(&mut self) {
        delegate!(self, c => c.start_timing())
    }

    fn keep_running(&self) -> bool {
        delegate!(self, c => c.keep_running())
    }

    fn iteration_done(&mut self) {
        delegate!(self, c => c.iteration_done())
    }

    fn check_new_value(&mut self, value: f64) {
        delegate!(self, c => c.check_new_value(value))
    }

    fn check_temperature(&mut self, temperature: f64) {
        delegate!(self, c => c.check_temperature(temperature))
    }

    fn reset(&mut self) {
        delegate!(self, c => c.reset())
    }

    fn state(&self) -> CriterionState {
        delegate!(self, c => c.state())
    }

    fn stop_reason(&self) -> Option<StopReason> {
        delegate!(self, c => c.stop_reason())
    }
}

impl From<MaxIterations> for Termination {
    fn from(criterion: MaxIterations) -> Self {
        Termination::MaxIterations(criterion)
    }
}

impl From<MaxSeconds> for Termination {
    fn from(criterion: MaxSeconds) -> Self {
        Termination::MaxSeconds(criterion)
    }
}

impl From<NoImprovement> for Termination {
    fn from(criterion: NoImprovement) -> Self {
        Termination::NoImprovement(criterion)
    }
}

impl From<MustImprove> for Termination {
    fn from(criterion: MustImprove) -> Self {
        Termination::MustImprove(criterion)
    }
}

impl From<External> for Termination {
    fn from(criterion: External) -> Self {
        Termination::External(criterion)
    }
}

impl From<MinTemperature> for Termination {
    fn from(criterion: MinTemperature) -> Self {
        Termination::MinTemperature(criterion)
    }
}

impl From<AlwaysRun> for Termination {
    fn from(criterion: AlwaysRun) -> Self {
        Termination::AlwaysRun(criterion)
    }
}

impl From<MultiCriterion> for Termination {
    fn from(criterion: MultiCriterion) -> Self {
        Termination::Multi(criterion)
    }
}

impl From<AnyCriterion> for Termination {
    fn from(criterion: AnyCriterion) -> Self {
        Termination::Any(criterion)
    }
}

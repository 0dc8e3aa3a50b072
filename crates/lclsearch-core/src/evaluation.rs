//! Evaluation results.

use crate::error::{LocalSearchError, Result};

/// Relative tolerance used when comparing an incremental delta against a
/// full recompute.
pub const DELTA_TOLERANCE: f64 = 1e-6;

/// Objective value of a solution, paired with its change relative to the
/// value before the last move.
///
/// `delta` is always `value - prior`. For [`Problem::current_value`]
/// it is zero.
///
/// [`Problem::current_value`]: crate::Problem::current_value
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    pub value: f64,
    pub delta: f64,
}

impl Evaluation {
    /// An evaluation with no change attached.
    pub fn of(value: f64) -> Self {
        Self { value, delta: 0.0 }
    }

    /// The evaluation reached from `prior` by `delta`.
    pub fn from_delta(prior: f64, delta: f64) -> Self {
        Self {
            value: prior + delta,
            delta,
        }
    }

    /// The evaluation of a fully recomputed `value` reached from `prior`.
    pub fn from_values(prior: f64, value: f64) -> Self {
        Self {
            value,
            delta: value - prior,
        }
    }

    /// Fails with [`LocalSearchError::ComputationFailure`] if either field is
    /// NaN or infinite.
    pub fn checked(self) -> Result<Self> {
        if self.value.is_finite() && self.delta.is_finite() {
            Ok(self)
        } else {
            Err(LocalSearchError::computation_failure(format!(
                "non-finite evaluation (value = {}, delta = {})",
                self.value, self.delta
            )))
        }
    }
}

/// Returns true if two objective values agree within [`DELTA_TOLERANCE`],
/// scaled by their magnitude.
pub fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= DELTA_TOLERANCE * scale
}

//! Optimization direction.

/// Whether the objective is minimized or maximized.
///
/// Every comparison in the engine goes through a `Goal`, so a criterion or
/// optimizer never infers the direction from the values it sees.
///
/// # Example
///
/// ```
/// use lclsearch_core::Goal;
///
/// assert!(Goal::Minimize.is_improvement(3.0, 5.0));
/// assert!(Goal::Maximize.is_improvement(5.0, 3.0));
/// assert!(!Goal::Minimize.is_improvement(5.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Goal {
    #[default]
    Minimize,
    Maximize,
}

impl Goal {
    /// Returns true if `candidate` is strictly better than `reference`.
    #[inline]
    pub fn is_improvement(self, candidate: f64, reference: f64) -> bool {
        match self {
            Goal::Minimize => candidate < reference,
            Goal::Maximize => candidate > reference,
        }
    }

    /// Converts a raw objective delta into the amount the move worsens the
    /// objective. Negative means the move improves.
    #[inline]
    pub fn worsening(self, delta: f64) -> f64 {
        match self {
            Goal::Minimize => delta,
            Goal::Maximize => -delta,
        }
    }

    /// The value every real objective value improves on.
    #[inline]
    pub fn worst_value(self) -> f64 {
        match self {
            Goal::Minimize => f64::INFINITY,
            Goal::Maximize => f64::NEG_INFINITY,
        }
    }

    pub fn is_minimize(self) -> bool {
        self == Goal::Minimize
    }
}

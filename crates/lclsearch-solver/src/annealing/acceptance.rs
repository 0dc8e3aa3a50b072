//! Metropolis acceptance.

/// Returns true if `temperature` is too small, or not a usable positive
/// number, to accept anything but strict improvements.
#[inline]
pub fn is_frozen(temperature: f64) -> bool {
    !(temperature.is_finite() && temperature > f64::MIN_POSITIVE)
}

/// Probability of accepting a move that worsens the objective by `worsening`.
///
/// Improving moves (`worsening < 0`) are always accepted. Otherwise the
/// probability is `exp(-worsening / temperature)`, which is 0 at a frozen
/// temperature.
///
/// # Example
///
/// ```
/// use lclsearch_solver::annealing::acceptance_probability;
///
/// assert_eq!(acceptance_probability(-5.0, 10.0), 1.0);
/// assert_eq!(acceptance_probability(0.0, 10.0), 1.0);
/// assert_eq!(acceptance_probability(10.0, 10.0), (-1.0f64).exp());
/// assert_eq!(acceptance_probability(1.0, 0.0), 0.0);
/// ```
pub fn acceptance_probability(worsening: f64, temperature: f64) -> f64 {
    if worsening < 0.0 {
        return 1.0;
    }
    if worsening.is_nan() || is_frozen(temperature) {
        return 0.0;
    }
    (-worsening / temperature).exp().clamp(0.0, 1.0)
}

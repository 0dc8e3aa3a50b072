//! Seeded random number generation.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random number generator used by every stochastic component.
///
/// ChaCha8 keeps seeded runs reproducible across platforms and releases.
pub type SearchRng = ChaCha8Rng;

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn create_rng(seed: Option<u64>) -> SearchRng {
    match seed {
        Some(seed) => SearchRng::seed_from_u64(seed),
        None => SearchRng::from_os_rng(),
    }
}

/// Draws a fresh seed so that an unseeded component can still be reset to
/// the exact stream it started with.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

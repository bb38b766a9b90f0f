use rand::Rng;

use std::time::Duration;

/// Draws a uniformly distributed duration from `[min, max)`.
///
/// Used by the tests and benches to manufacture source delays.
///
/// # Panics
/// Panics when `min >= max`.
pub fn random_between(min: Duration, max: Duration) -> Duration {
    rand::thread_rng().gen_range(min..max)
}

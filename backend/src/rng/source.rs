//! Seeded random source backed by `rand`
//!
//! Same seed → same sequence of draws. This is CRITICAL for:
//! - Comparability (adaptive and fixed-time variants see identical demand)
//! - Testing (verify behavior against known sequences)
//! - Research (reproduce published results)

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;

/// Deterministic random source for one generation pass
///
/// # Example
/// ```
/// use signal_eval_core_rs::EpisodeRng;
///
/// let mut rng = EpisodeRng::new(42);
/// let u = rng.uniform();
/// assert!((0.0..1.0).contains(&u));
/// ```
pub struct EpisodeRng {
    inner: StdRng,
}

impl EpisodeRng {
    /// Create a new source from an explicit seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0.0, 1.0)`
    pub fn uniform(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Uniform index in `[0, n)`
    ///
    /// # Panics
    /// Panics if `n` is zero.
    pub fn index(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be positive");
        self.inner.gen_range(0..n)
    }

    /// Draw one sample from a continuous distribution
    pub fn sample<D: Distribution<f64>>(&mut self, distribution: &D) -> f64 {
        distribution.sample(&mut self.inner)
    }
}

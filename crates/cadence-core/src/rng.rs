//! Deterministic random source for jitter and probability draws.
//!
//! Every random decision the scheduler makes (initial jitter, re-trigger
//! jitter, the per-fire probability roll) goes through one `SchedRng`
//! owned by the scheduler.  Seeding it makes a whole run reproducible:
//! the same seed and the same sequence of `update` calls always fire the
//! same actions at the same simulation times.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct SchedRng(SmallRng);

impl SchedRng {
    pub fn new(seed: u64) -> Self {
        SchedRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Runs are not reproducible.
    pub fn from_entropy() -> Self {
        SchedRng(SmallRng::from_entropy())
    }

    /// Seed from `seed` when given, otherwise from entropy.
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform sample in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// Uniform extra delay in `[0, range)`.
    ///
    /// Returns `0.0` for an empty, negative or non-finite range instead of
    /// panicking; callers validate ranges before they get here.
    #[inline]
    pub fn jitter(&mut self, range: f64) -> f64 {
        if range.is_finite() && range > 0.0 {
            self.0.gen_range(0.0..range)
        } else {
            0.0
        }
    }

    /// `true` with probability `p` (clamped to [0, 1]).  `0` never succeeds
    /// and `1` always does.
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self.0.gen_bool(p)
    }
}

//! Seeded randomness for the simulation
//!
//! Every random draw in `sim` goes through [`SimRng`] so a run is
//! reproducible from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// PCG32-backed random source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimRng {
    seed: u64,
    inner: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[lo, hi)`; `lo` when the range is empty
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        if lo < hi {
            self.inner.random_range(lo..hi)
        } else {
            lo
        }
    }

    /// Uniform integer in `[lo, hi]`
    pub fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        self.inner.random_range(lo..=hi)
    }

    /// Uniform float in `[0, 1)`
    pub fn unit(&mut self) -> f32 {
        self.inner.random::<f32>()
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.inner.random_bool(p.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.range(6.0, 10.0), b.range(6.0, 10.0));
        }
    }

    #[test]
    fn test_ranges_respected() {
        let mut rng = SimRng::new(7);
        for _ in 0..1000 {
            let f = rng.range(2.0, 3.0);
            assert!((2.0..3.0).contains(&f));
            let i = rng.range_inclusive(10, 15);
            assert!((10..=15).contains(&i));
        }
    }

    #[test]
    fn test_range_stays_below_upper_bound() {
        let mut rng = SimRng::new(3);
        for _ in 0..100_000 {
            let f = rng.range(2.0, 3.0);
            assert!(f < 3.0, "drew {}", f);
            let tiny = rng.range(1.0, 1.0 + f32::EPSILON);
            assert!(tiny < 1.0 + f32::EPSILON);
        }
        assert_eq!(rng.range(5.0, 5.0), 5.0);
        assert_eq!(rng.range(5.0, 4.0), 5.0);
        assert_eq!(rng.seed(), 3);
    }
}

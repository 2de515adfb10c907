//! Deterministic random number generation for the bonus wheel.
//!
//! RULE: nothing in the core calls a platform RNG.
//! Wheel draws come from a `WheelRng` seeded once at engine
//! construction, so the same seed always lands on the same
//! sequence of segments.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Stream index mixed into the master seed. Append only.
const WHEEL_STREAM: u64 = 1;

pub struct WheelRng {
    inner: Pcg64Mcg,
}

impl WheelRng {
    pub fn new(master_seed: u64) -> Self {
        let derived_seed = master_seed ^ WHEEL_STREAM.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Pick an index in [0, n).
    pub fn next_index(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be > 0");
        (self.inner.next_u64() % n as u64) as usize
    }
}

//! Signature Sequence Counter
//!
//! Each signature carries an opaque sequence id. Values come from a
//! full-period linear congruential generator over `u32`, so the counter
//! cannot repeat a value until it has produced all 2^32 of them.

use serde::{Serialize, Deserialize};

use super::rng::RandomSource;

/// LCG multiplier (Numerical Recipes). With an odd increment and
/// `MULTIPLIER - 1` divisible by 4, the period mod 2^32 is maximal.
const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;

/// Lower bound of the starting value range.
pub const SEQUENCE_SEED_MIN: u64 = 1000;
/// Upper bound (exclusive) of the starting value range.
pub const SEQUENCE_SEED_MAX: u64 = 60000;

/// Per-signer sequence id generator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SequenceCounter {
    state: u32,
}

impl SequenceCounter {
    /// Create a counter at a fixed starting state.
    pub fn new(start: u32) -> Self {
        Self { state: start }
    }

    /// Create a counter whose start is drawn from [1000, 60000).
    pub fn from_rng<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        // Range fits in u32 by construction.
        let start = rng.next_range(SEQUENCE_SEED_MIN, SEQUENCE_SEED_MAX) as u32;
        Self::new(start)
    }

    /// Next sequence id. Never repeats within 2^32 calls.
    pub fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::DeterministicRng;
    use std::collections::HashSet;

    #[test]
    fn test_no_repeats_over_ten_thousand_calls() {
        let mut counter = SequenceCounter::from_rng(&mut DeterministicRng::new(3));
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(counter.next()));
        }
    }

    #[test]
    fn test_same_start_same_sequence() {
        let mut a = SequenceCounter::new(1234);
        let mut b = SequenceCounter::new(1234);
        for _ in 0..100 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_known_step() {
        let mut counter = SequenceCounter::new(0);
        assert_eq!(counter.next(), INCREMENT);
    }

    #[test]
    fn test_seed_range() {
        for seed in 0..200 {
            let counter = SequenceCounter::from_rng(&mut DeterministicRng::new(seed));
            assert!((SEQUENCE_SEED_MIN..SEQUENCE_SEED_MAX).contains(&(counter.state as u64)));
        }
    }
}

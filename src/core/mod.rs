//! Core primitives.
//!
//! Time, randomness and sequencing. Everything above this layer takes these
//! as explicit parameters so a signer can be driven deterministically.

pub mod clock;
pub mod rng;
pub mod sequence;

// Re-export core types
pub use clock::{Clock, ManualClock, SystemClock};
pub use rng::{DeterministicRng, RandomSource};
pub use sequence::SequenceCounter;

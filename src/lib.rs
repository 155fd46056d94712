//! # Sigforge
//!
//! Builds the signature envelope that accompanies every call to a remote
//! RPC service which checks client telemetry for signs of automation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         SIGFORGE                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── clock.rs    - Session-relative monotonic clock          │
//! │  ├── rng.rs      - Seedable Xorshift128+ random source       │
//! │  └── sequence.rs - Signature sequence ids                    │
//! │                                                              │
//! │  signature/      - Signature construction                    │
//! │  ├── types.rs    - Signature, fixes, sensors, device         │
//! │  ├── location.rs - Synthetic GPS fix stream                  │
//! │  ├── sensor.rs   - Synthetic motion sample                   │
//! │  ├── assembler.rs- One signature per call                    │
//! │  └── signer.rs   - Hash → encrypt pipeline                   │
//! │                                                              │
//! │  oracle/         - External hashing/encryption interfaces    │
//! │  network/        - Request envelope and session state        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! All randomness comes from the session's [`DeterministicRng`] and all
//! time from an injected [`Clock`]. With a fixed seed and a
//! [`ManualClock`], a signer produces identical signatures run after run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod network;
pub mod oracle;
pub mod signature;

// Re-export commonly used types
pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::rng::{DeterministicRng, RandomSource};
pub use network::protocol::{PlatformRequest, RequestEnvelope};
pub use network::session::Session;
pub use oracle::{EncryptionOracle, HashResult, HashingOracle, OracleError};
pub use signature::signer::{SignOutcome, Signer, SignerConfig, SignerError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Signature Construction
//!
//! ## Module Structure
//!
//! - `types`: Signature, location fix, sensor and device structures
//! - `location`: Synthetic GPS fix generation
//! - `sensor`: Synthetic motion sample generation
//! - `assembler`: Builds one signature from session state
//! - `signer`: Hashing/encryption pipeline around the assembler

pub mod types;
pub mod location;
pub mod sensor;
pub mod assembler;
pub mod signer;

// Re-export key types
pub use types::{
    ActivityStatus, CoordinateUpdate, DeviceInfo, LocationFix, PlayerCoordinate, SensorInfo,
    Signature,
};
pub use location::LocationFixSynthesizer;
pub use assembler::{Assembly, SignatureAssembler};
pub use signer::{SignOutcome, Signer, SignerConfig, SignerError, SignerPhase};

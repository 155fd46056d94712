//! Signature Assembly
//!
//! Builds one signature for one outgoing call from synthesized telemetry
//! and the session's state. The assembler reads the session but never
//! writes it: the accuracy/altitude write-back is returned as a
//! [`CoordinateUpdate`] for the caller to apply.

use crate::core::rng::RandomSource;
use crate::core::sequence::SequenceCounter;
use super::location::LocationFixSynthesizer;
use super::sensor::synthesize_sensor_info;
use super::types::{
    ActivityStatus, CoordinateUpdate, DeviceInfo, PlayerCoordinate, Signature,
};

/// Length of the per-session hash.
pub const SESSION_HASH_LEN: usize = 16;

/// Result of one assembly.
#[derive(Clone, Debug, PartialEq)]
pub struct Assembly {
    /// Signature with hash fields still empty.
    pub signature: Signature,
    /// Values of the last fix, to write onto the player coordinate.
    pub coordinate_update: CoordinateUpdate,
    /// Elapsed time minus the last fix's timestamp.
    pub ms_since_last_fix: u64,
}

impl Assembly {
    /// Value for the envelope's accuracy field.
    ///
    /// The protocol reports the updated altitude here.
    pub fn envelope_accuracy(&self) -> f64 {
        self.coordinate_update.altitude
    }
}

/// Per-session signature builder.
///
/// Owns the state that must persist across signatures: the session hash,
/// the synthesizer's last elapsed time and the sequence counter.
#[derive(Clone, Debug)]
pub struct SignatureAssembler {
    session_hash: [u8; SESSION_HASH_LEN],
    synthesizer: LocationFixSynthesizer,
    sequence: SequenceCounter,
}

impl SignatureAssembler {
    /// Create an assembler, drawing the session hash and sequence start
    /// from `rng`.
    pub fn new<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut session_hash = [0u8; SESSION_HASH_LEN];
        rng.fill_bytes(&mut session_hash);
        let sequence = SequenceCounter::from_rng(rng);

        Self {
            session_hash,
            synthesizer: LocationFixSynthesizer::new(),
            sequence,
        }
    }

    /// The fixed per-session hash.
    pub fn session_hash(&self) -> &[u8; SESSION_HASH_LEN] {
        &self.session_hash
    }

    /// Elapsed time used by the most recent assembly.
    pub fn last_elapsed(&self) -> u64 {
        self.synthesizer.last_elapsed()
    }

    /// Build a signature at `elapsed_now`.
    pub fn assemble<R: RandomSource + ?Sized>(
        &mut self,
        elapsed_now: u64,
        unix_millis: u64,
        coordinate: &PlayerCoordinate,
        device_info: &DeviceInfo,
        hasher_constant: i64,
        rng: &mut R,
    ) -> Assembly {
        let fixes = self.synthesizer.synthesize(
            elapsed_now,
            coordinate.latitude,
            coordinate.longitude,
            rng,
        );

        // The synthesizer always yields a fix; fall back to the current
        // coordinate rather than panic.
        let (coordinate_update, last_fix_timestamp) = match fixes.last() {
            Some(fix) => (CoordinateUpdate::from_fix(fix), fix.timestamp_snapshot),
            None => (
                CoordinateUpdate {
                    horizontal_accuracy: coordinate.horizontal_accuracy,
                    vertical_accuracy: coordinate.vertical_accuracy,
                    altitude: coordinate.altitude,
                },
                elapsed_now,
            ),
        };

        let sensor = synthesize_sensor_info(elapsed_now, rng);

        let signature = Signature {
            location_fix: fixes,
            sensor_info: vec![sensor],
            device_info: device_info.clone(),
            activity_status: ActivityStatus::stationary(),
            location_hash1: 0,
            location_hash2: 0,
            session_hash: self.session_hash,
            timestamp: unix_millis,
            request_hash: Vec::new(),
            hasher_constant,
            timestamp_since_start: elapsed_now,
            sequence_id: self.sequence.next(),
        };

        Assembly {
            signature,
            coordinate_update,
            ms_since_last_fix: elapsed_now.saturating_sub(last_fix_timestamp),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! Signature Data Model
//!
//! Structures that make up the signature envelope. Field declaration order
//! is the canonical byte order, so fields must not be reordered.

use serde::{Serialize, Deserialize};

/// GPS provider name reported on every synthetic fix.
pub const FIX_PROVIDER: &str = "fused";
/// Provider status reported on every synthetic fix.
pub const FIX_PROVIDER_STATUS: u32 = 3;
/// Location type reported on every synthetic fix.
pub const FIX_LOCATION_TYPE: u32 = 1;
/// Course/speed value meaning "unknown".
pub const UNKNOWN_MOTION: f32 = -1.0;

/// The player's true position as held by the session.
///
/// Accuracy and altitude are overwritten after every signature with the
/// values of the last synthetic fix (see [`CoordinateUpdate`]).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerCoordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Horizontal accuracy in meters.
    pub horizontal_accuracy: f64,
    /// Vertical accuracy in meters.
    pub vertical_accuracy: f64,
    /// Altitude in meters.
    pub altitude: f64,
}

impl PlayerCoordinate {
    /// Coordinate at a position with zeroed accuracy and altitude.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            horizontal_accuracy: 0.0,
            vertical_accuracy: 0.0,
            altitude: 0.0,
        }
    }

    /// Location payload handed to the hashing oracle.
    ///
    /// Big-endian latitude, longitude, altitude, in that order.
    pub fn location_bytes(&self) -> [u8; 24] {
        let mut out = [0u8; 24];
        out[0..8].copy_from_slice(&self.latitude.to_be_bytes());
        out[8..16].copy_from_slice(&self.longitude.to_be_bytes());
        out[16..24].copy_from_slice(&self.altitude.to_be_bytes());
        out
    }
}

/// Accuracy/altitude values to write back onto the player coordinate.
///
/// The assembler never touches the session; the signer applies this.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateUpdate {
    /// New horizontal accuracy.
    pub horizontal_accuracy: f64,
    /// New vertical accuracy.
    pub vertical_accuracy: f64,
    /// New altitude.
    pub altitude: f64,
}

impl CoordinateUpdate {
    /// Take the values from a fix.
    pub fn from_fix(fix: &LocationFix) -> Self {
        Self {
            horizontal_accuracy: f64::from(fix.horizontal_accuracy),
            vertical_accuracy: f64::from(fix.vertical_accuracy),
            altitude: f64::from(fix.altitude),
        }
    }

    /// Write the values onto a coordinate.
    pub fn apply(&self, coordinate: &mut PlayerCoordinate) {
        coordinate.horizontal_accuracy = self.horizontal_accuracy;
        coordinate.vertical_accuracy = self.vertical_accuracy;
        coordinate.altitude = self.altitude;
    }
}

/// One synthetic GPS sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    /// Provider name (always [`FIX_PROVIDER`]).
    pub provider: String,
    /// Milliseconds since session start.
    pub timestamp_snapshot: u64,
    /// Jittered latitude.
    pub latitude: f32,
    /// Jittered longitude.
    pub longitude: f32,
    /// Horizontal accuracy in meters.
    pub horizontal_accuracy: f32,
    /// Vertical accuracy in meters.
    pub vertical_accuracy: f32,
    /// Altitude in meters.
    pub altitude: f32,
    /// Provider status (always [`FIX_PROVIDER_STATUS`]).
    pub provider_status: u32,
    /// Location type (always [`FIX_LOCATION_TYPE`]).
    pub location_type: u32,
    /// Course, -1 = unknown.
    pub course: f32,
    /// Speed, -1 = unknown.
    pub speed: f32,
}

/// One synthetic accelerometer/gyroscope/attitude/gravity sample.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorInfo {
    /// Milliseconds since session start.
    pub timestamp_snapshot: u64,
    /// Linear acceleration, X axis (m/s²).
    pub linear_acceleration_x: f64,
    /// Linear acceleration, Y axis (m/s²).
    pub linear_acceleration_y: f64,
    /// Linear acceleration, Z axis (m/s²).
    pub linear_acceleration_z: f64,
    /// Magnetic field accuracy (always -1).
    pub magnetic_field_accuracy: i32,
    /// Attitude pitch.
    pub attitude_pitch: f64,
    /// Attitude yaw.
    pub attitude_yaw: f64,
    /// Attitude roll.
    pub attitude_roll: f64,
    /// Rotation rate, X axis (rad/s).
    pub rotation_rate_x: f64,
    /// Rotation rate, Y axis (rad/s).
    pub rotation_rate_y: f64,
    /// Rotation rate, Z axis (rad/s).
    pub rotation_rate_z: f64,
    /// Gravity vector, X.
    pub gravity_x: f64,
    /// Gravity vector, Y.
    pub gravity_y: f64,
    /// Gravity vector, Z.
    pub gravity_z: f64,
    /// Sensor status (always 3).
    pub status: i32,
}

/// Device identity, passed through from the session unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Hex device identifier.
    pub device_id: String,
    /// Brand, e.g. "Apple".
    pub device_brand: String,
    /// Marketing model name.
    pub device_model: String,
    /// Boot model identifier.
    pub device_model_boot: String,
    /// Hardware manufacturer.
    pub hardware_manufacturer: String,
    /// Hardware model identifier.
    pub hardware_model: String,
    /// Firmware brand.
    pub firmware_brand: String,
    /// Firmware version.
    pub firmware_type: String,
}

/// Motion activity classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityStatus {
    /// Device is walking.
    pub walking: bool,
    /// Device is running.
    pub running: bool,
    /// Device is in a vehicle.
    pub automotive: bool,
    /// Device is on a bicycle.
    pub cycling: bool,
    /// Device is not moving.
    pub stationary: bool,
}

impl ActivityStatus {
    /// The only status the signer reports.
    pub fn stationary() -> Self {
        Self {
            stationary: true,
            ..Default::default()
        }
    }
}

/// The signature envelope sent to the hashing and encryption oracles.
///
/// `location_hash1`, `location_hash2` and `request_hash` stay empty until
/// the hashing step fills them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Synthetic GPS samples, increasing timestamps.
    pub location_fix: Vec<LocationFix>,
    /// Synthetic motion samples (exactly one).
    pub sensor_info: Vec<SensorInfo>,
    /// Device identity.
    pub device_info: DeviceInfo,
    /// Activity classification.
    pub activity_status: ActivityStatus,
    /// Location auth hash from the hashing oracle.
    pub location_hash1: u32,
    /// Location hash from the hashing oracle.
    pub location_hash2: u32,
    /// Per-session random bytes.
    pub session_hash: [u8; 16],
    /// Unix time in milliseconds.
    pub timestamp: u64,
    /// Per-request hashes, in request order.
    pub request_hash: Vec<u64>,
    /// Constant supplied by the hashing oracle.
    pub hasher_constant: i64,
    /// Milliseconds since session start.
    pub timestamp_since_start: u64,
    /// Sequence id.
    pub sequence_id: u32,
}

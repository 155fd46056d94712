//! Motion sensor sample synthesis.
//!
//! One sample per signature, drawn fresh each time. Values describe a
//! device lying roughly still: small accelerations and rotation rates.

use crate::core::rng::RandomSource;
use super::types::SensorInfo;

/// Sensor timestamp lead over the signature's elapsed time (ms), [min, max).
pub const SENSOR_LEAD_MS: (u64, u64) = (100, 250);

/// Linear acceleration bound per axis (m/s²).
pub const ACCELERATION_BOUND: f64 = 0.7;

/// Rotation rate upper bounds per axis (rad/s).
pub const ROTATION_RATE_MAX: [f64; 3] = [0.7, 0.8, 0.8];

/// Draw a sensor sample for a signature built at `elapsed_now`.
pub fn synthesize_sensor_info<R: RandomSource + ?Sized>(
    elapsed_now: u64,
    rng: &mut R,
) -> SensorInfo {
    let lead = rng.next_range(SENSOR_LEAD_MS.0, SENSOR_LEAD_MS.1);

    SensorInfo {
        timestamp_snapshot: elapsed_now + lead,
        linear_acceleration_x: rng.next_f64_range(-ACCELERATION_BOUND, ACCELERATION_BOUND),
        linear_acceleration_y: rng.next_f64_range(-ACCELERATION_BOUND, ACCELERATION_BOUND),
        linear_acceleration_z: rng.next_f64_range(-ACCELERATION_BOUND, ACCELERATION_BOUND),
        magnetic_field_accuracy: -1,
        attitude_pitch: rng.next_f64_range(-1.0, 1.0),
        attitude_yaw: rng.next_f64_range(-1.0, 1.0),
        attitude_roll: rng.next_f64_range(-1.0, 1.0),
        rotation_rate_x: rng.next_f64_range(0.0, ROTATION_RATE_MAX[0]),
        rotation_rate_y: rng.next_f64_range(0.0, ROTATION_RATE_MAX[1]),
        rotation_rate_z: rng.next_f64_range(0.0, ROTATION_RATE_MAX[2]),
        gravity_x: rng.next_f64_range(-1.0, 1.0),
        gravity_y: rng.next_f64_range(-1.0, 1.0),
        gravity_z: rng.next_f64_range(-1.0, 1.0),
        status: 3,
    }
}

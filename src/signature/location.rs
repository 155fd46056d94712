//! Location-Fix Synthesis
//!
//! Emulates the GPS provider updates a real device would have emitted
//! between the previous signature and now. Cadence is randomized around
//! 1 Hz, the number of fixes per call is capped, and at least one fix is
//! always produced.
//!
//! ## Timing
//!
//! ```text
//!  last_elapsed        base                                   elapsed_now
//!       |---- play ----|-- fix 0 --|-- fix 1 --| ... |-- fix n-1 --|
//!                       <------- provider_count * ms_per_fix ------->
//! ```
//!
//! Each fix `i` lands at `base + i * ms_per_fix + jitter_i` where
//! `jitter_i < (i + 1) * play_part`. Jitter stays far below `ms_per_fix`,
//! so timestamps strictly increase.

use tracing::trace;

use crate::core::rng::RandomSource;
use super::types::{
    LocationFix, FIX_LOCATION_TYPE, FIX_PROVIDER, FIX_PROVIDER_STATUS, UNKNOWN_MOTION,
};

/// Equatorial earth radius used for meter offsets.
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Fix cadence lower bound (ms).
pub const MS_PER_FIX_MIN: u64 = 995;
/// Fix cadence upper bound, exclusive (ms).
pub const MS_PER_FIX_MAX: u64 = 999;

/// Per-call fix cap lower bound.
pub const FIX_CAP_MIN: u64 = 8;
/// Per-call fix cap upper bound, exclusive.
pub const FIX_CAP_MAX: u64 = 11;

/// Coordinate jitter lower bound (meters).
pub const OFFSET_METERS_MIN: u64 = 10;
/// Coordinate jitter upper bound, exclusive (meters).
pub const OFFSET_METERS_MAX: u64 = 110;

/// Accuracy range (meters) for both horizontal and vertical accuracy.
pub const ACCURACY_RANGE: (f64, f64) = (5.0, 25.0);
/// Altitude range (meters).
pub const ALTITUDE_RANGE: (f64, f64) = (10.0, 30.0);

/// Latitude used for the east-west scale near the poles, where the
/// meridians converge and `cos(latitude)` goes to zero.
const MAX_SCALE_LATITUDE: f64 = 89.9999;

/// Shift a coordinate by a number of meters north and east.
///
/// Flat-earth approximation; accurate enough for offsets of a few
/// hundred meters. The result is always a valid coordinate: latitude is
/// clamped to `[-90, 90]` and longitude wrapped into `[-180, 180)`.
pub fn offset_coordinate(
    latitude: f64,
    longitude: f64,
    meters_north: f64,
    meters_east: f64,
) -> (f64, f64) {
    let scale_latitude = latitude.clamp(-MAX_SCALE_LATITUDE, MAX_SCALE_LATITUDE);
    let d_lat = meters_north / EARTH_RADIUS_METERS;
    let d_lon = meters_east / (EARTH_RADIUS_METERS * scale_latitude.to_radians().cos());
    (
        (latitude + d_lat.to_degrees()).clamp(-90.0, 90.0),
        normalize_longitude(longitude + d_lon.to_degrees()),
    )
}

/// Wrap a longitude into `[-180, 180)`.
fn normalize_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to the modulus for tiny negative inputs.
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Timing plan for one synthesis call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixSchedule {
    /// Cadence used for this call.
    pub ms_per_fix: u64,
    /// Number of fixes to emit (>= 1).
    pub provider_count: u64,
    /// Timestamp of the first slot.
    pub base_timestamp: u64,
    /// Jitter unit; fix `i` gets jitter in `[0, (i + 1) * play_window_part)`.
    pub play_window_part: u64,
}

impl FixSchedule {
    /// Plan the fixes between `last_elapsed` and `elapsed_now`.
    pub fn plan<R: RandomSource + ?Sized>(
        elapsed_now: u64,
        last_elapsed: u64,
        rng: &mut R,
    ) -> Self {
        let ms_per_fix = rng.next_range(MS_PER_FIX_MIN, MS_PER_FIX_MAX);
        let since_last = elapsed_now.saturating_sub(last_elapsed);
        let cap = rng.next_range(FIX_CAP_MIN, FIX_CAP_MAX);
        let provider_count = (since_last / ms_per_fix).min(cap).max(1);

        let total_window = provider_count * ms_per_fix;
        // A forced single fix may reach back before the previous call;
        // never place it earlier than last_elapsed.
        let base_timestamp = elapsed_now.saturating_sub(total_window).max(last_elapsed);
        let mut play_window = base_timestamp.saturating_sub(last_elapsed);

        if play_window == 0 && provider_count == 1 && ms_per_fix >= elapsed_now {
            // First call with little elapsed time: avoid an all-zero timestamp.
            play_window = rng.next_range(0, elapsed_now.saturating_sub(base_timestamp));
        } else {
            play_window = play_window.min(provider_count * 2);
        }

        let play_window_part = if play_window != 0 {
            play_window / provider_count
        } else {
            1
        };

        Self {
            ms_per_fix,
            provider_count,
            base_timestamp,
            play_window_part,
        }
    }
}

/// Synthesizer state carried between signatures.
#[derive(Clone, Debug, Default)]
pub struct LocationFixSynthesizer {
    last_elapsed: u64,
}

impl LocationFixSynthesizer {
    /// Fresh synthesizer; the previous call is taken to be at 0 ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time used by the most recent synthesis.
    pub fn last_elapsed(&self) -> u64 {
        self.last_elapsed
    }

    /// Produce the fixes for `elapsed_now` around the true position.
    ///
    /// Returns at least one fix, ordered by increasing timestamp. Updates
    /// the stored elapsed time to `elapsed_now` (never backwards).
    ///
    /// `elapsed_now` must not be earlier than [`last_elapsed`](Self::last_elapsed);
    /// the elapsed time comes from a monotonic clock. Debug builds assert it.
    pub fn synthesize<R: RandomSource + ?Sized>(
        &mut self,
        elapsed_now: u64,
        latitude: f64,
        longitude: f64,
        rng: &mut R,
    ) -> Vec<LocationFix> {
        debug_assert!(
            elapsed_now >= self.last_elapsed,
            "elapsed time went backwards: {} < {}",
            elapsed_now,
            self.last_elapsed
        );
        let schedule = FixSchedule::plan(elapsed_now, self.last_elapsed, rng);

        let fixes: Vec<LocationFix> = (0..schedule.provider_count)
            .map(|i| {
                let jitter = rng.next_range(0, (i + 1) * schedule.play_window_part);
                let timestamp = schedule.base_timestamp + i * schedule.ms_per_fix + jitter;
                synthesize_fix(timestamp, latitude, longitude, rng)
            })
            .collect();

        trace!(
            elapsed_now,
            last_elapsed = self.last_elapsed,
            count = schedule.provider_count,
            ms_per_fix = schedule.ms_per_fix,
            "synthesized location fixes"
        );

        self.last_elapsed = self.last_elapsed.max(elapsed_now);
        fixes
    }
}

/// One fix at `timestamp`, jittered around the true coordinate.
fn synthesize_fix<R: RandomSource + ?Sized>(
    timestamp: u64,
    latitude: f64,
    longitude: f64,
    rng: &mut R,
) -> LocationFix {
    let north = rng.next_range(OFFSET_METERS_MIN, OFFSET_METERS_MAX) as f64;
    let east = rng.next_range(OFFSET_METERS_MIN, OFFSET_METERS_MAX) as f64;
    let (lat, lon) = offset_coordinate(latitude, longitude, north, east);

    LocationFix {
        provider: FIX_PROVIDER.to_string(),
        timestamp_snapshot: timestamp,
        latitude: lat as f32,
        longitude: lon as f32,
        horizontal_accuracy: rng.next_f64_range(ACCURACY_RANGE.0, ACCURACY_RANGE.1) as f32,
        vertical_accuracy: rng.next_f64_range(ACCURACY_RANGE.0, ACCURACY_RANGE.1) as f32,
        altitude: rng.next_f64_range(ALTITUDE_RANGE.0, ALTITUDE_RANGE.1) as f32,
        provider_status: FIX_PROVIDER_STATUS,
        location_type: FIX_LOCATION_TYPE,
        course: UNKNOWN_MOTION,
        speed: UNKNOWN_MOTION,
    }
}

// =============================================================================
// TESTS
// =============================================================================

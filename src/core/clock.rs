//! Session Clock
//!
//! Elapsed milliseconds since the signer was created, plus the wall-clock
//! timestamp stamped onto each signature. The elapsed value must never go
//! backwards and is never reset for the lifetime of a signer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Source of session-relative and wall-clock time.
///
/// # Invariants
///
/// - `elapsed_ms()` is non-negative and non-decreasing across calls.
/// - Implementations carry no global state; each signer owns its own clock.
pub trait Clock: Send + Sync {
    /// Milliseconds elapsed since the clock was started.
    fn elapsed_ms(&self) -> u64;

    /// Current Unix time in milliseconds.
    fn unix_millis(&self) -> u64;
}

/// Real clock backed by [`Instant`], started on construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    /// Start a clock at the current instant.
    pub fn start() -> Self {
        Self { started: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for SystemClock {
    fn elapsed_ms(&self) -> u64 {
        // Instant is monotonic, so this never decreases.
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn unix_millis(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Hand-driven clock for tests and replays.
///
/// Time only moves when [`advance`](ManualClock::advance) or
/// [`set_elapsed`](ManualClock::set_elapsed) is called. `set_elapsed` never
/// moves time backwards.
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed: AtomicU64,
    unix_base: u64,
}

impl ManualClock {
    /// Create a clock at elapsed 0 whose wall clock starts at `unix_base` ms.
    pub fn new(unix_base: u64) -> Self {
        Self {
            elapsed: AtomicU64::new(0),
            unix_base,
        }
    }

    /// Move time forward by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.elapsed.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump to an absolute elapsed time. Earlier values are ignored.
    pub fn set_elapsed(&self, ms: u64) {
        self.elapsed.fetch_max(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn elapsed_ms(&self) -> u64 {
        self.elapsed.load(Ordering::SeqCst)
    }

    fn unix_millis(&self) -> u64 {
        self.unix_base.saturating_add(self.elapsed_ms())
    }
}

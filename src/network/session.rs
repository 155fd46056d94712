//! Authenticated Session State
//!
//! The caller-owned state a signer reads from: the player's coordinate,
//! the device identity and the random source. One session pairs with one
//! [`Signer`](crate::signature::Signer).

use uuid::Uuid;

use crate::core::rng::DeterministicRng;
use crate::signature::types::{CoordinateUpdate, DeviceInfo, PlayerCoordinate};

/// Session state consumed by the signer.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    /// Random source for every synthetic value in this session.
    pub rng: DeterministicRng,
    /// Player's true coordinate.
    pub player: PlayerCoordinate,
    /// Device identity reported in signatures.
    pub device_info: DeviceInfo,
}

impl Session {
    /// Create a session with an explicit random source.
    pub fn new(rng: DeterministicRng, player: PlayerCoordinate, device_info: DeviceInfo) -> Self {
        Self {
            id: Uuid::new_v4(),
            rng,
            player,
            device_info,
        }
    }

    /// Unique id; a signer only signs for the session it was created with.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Create a session seeded from OS entropy.
    pub fn from_entropy(player: PlayerCoordinate, device_info: DeviceInfo) -> Self {
        Self::new(DeterministicRng::from_entropy(), player, device_info)
    }

    /// Move the player. Accuracy and altitude are left as they were.
    pub fn set_position(&mut self, latitude: f64, longitude: f64) {
        self.player.latitude = latitude;
        self.player.longitude = longitude;
    }

    /// Apply a coordinate update produced by a signature build.
    pub fn apply_coordinate_update(&mut self, update: &CoordinateUpdate) {
        update.apply(&mut self.player);
    }
}

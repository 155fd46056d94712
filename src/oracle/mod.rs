//! External Oracles
//!
//! The hashing and encryption algorithms live outside this crate. The
//! signer reaches them through these traits, injected at construction.
//!
//! ```text
//! ┌──────────┐  request/signature/location/auth bytes  ┌────────────────┐
//! │  Signer  │ ──────────────────────────────────────▶ │ HashingOracle  │
//! │          │ ◀────────── HashResult | None ───────── │                │
//! │          │                                         └────────────────┘
//! │          │  signature bytes + u32 timestamp        ┌────────────────┐
//! │          │ ──────────────────────────────────────▶ │EncryptionOracle│
//! │          │ ◀──────────── ciphertext ────────────── │                │
//! └──────────┘                                         └────────────────┘
//! ```

pub mod local;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::network::protocol::RequestEnvelope;
use crate::signature::types::Signature;

pub use local::{LocalCipher, LocalHasher};

/// Hash values returned by the hashing oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashResult {
    /// Hash over auth and location bytes.
    pub location_auth_hash: u32,
    /// Hash over location bytes.
    pub location_hash: u32,
    /// One hash per request, in submission order.
    pub request_hashes: Vec<u64>,
}

/// Oracle failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OracleError {
    /// The oracle did not answer in time.
    #[error("oracle timed out after {0:?}")]
    Timeout(Duration),
    /// The oracle refused the request for a protocol reason
    /// (expired key, unsupported version, quota).
    #[error("oracle rejected request: {0}")]
    Rejected(String),
    /// Any other failure (network, malformed response).
    #[error("oracle failure: {0}")]
    Failed(String),
}

/// Content hashing service.
#[async_trait]
pub trait HashingOracle: Send + Sync {
    /// Hash the outgoing call.
    ///
    /// `Ok(None)` means "no data yet"; the caller polls again.
    async fn hash(
        &self,
        envelope: &RequestEnvelope,
        signature: &Signature,
        location_bytes: &[u8],
        request_bytes: &[Vec<u8>],
        auth_bytes: &[u8],
    ) -> Result<Option<HashResult>, OracleError>;

    /// Constant stamped into every signature hashed by this oracle.
    fn client_constant(&self) -> i64;
}

/// Signature encryption service.
#[async_trait]
pub trait EncryptionOracle: Send + Sync {
    /// Encrypt canonical signature bytes.
    async fn encrypt(&self, signature: &[u8], timestamp_since_start: u32)
        -> Result<Vec<u8>, OracleError>;
}

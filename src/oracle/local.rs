//! Local Development Oracles
//!
//! SHA-256 based stand-ins for the external hashing and encryption
//! services. They are deterministic and self-consistent, which is what the
//! demo binary and tests need; they are NOT the production algorithms and
//! a remote service will not accept their output.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use sha2::{Sha256, Digest};

use super::{EncryptionOracle, HashResult, HashingOracle, OracleError};
use crate::network::protocol::RequestEnvelope;
use crate::signature::types::Signature;

/// Constant reported by [`LocalHasher::client_constant`].
pub const LOCAL_CLIENT_CONSTANT: i64 = 0x1D5C_5E6A_1F3B_2C4D;

/// Size of the timestamp prefix on [`LocalCipher`] output.
const TIMESTAMP_PREFIX: usize = 4;

fn digest(domain: &[u8], parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

fn digest_u32(domain: &[u8], parts: &[&[u8]]) -> u32 {
    let d = digest(domain, parts);
    u32::from_be_bytes([d[0], d[1], d[2], d[3]])
}

fn digest_u64(domain: &[u8], parts: &[&[u8]]) -> u64 {
    let d = digest(domain, parts);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&d[..8]);
    u64::from_be_bytes(bytes)
}

/// SHA-256 hashing stand-in.
///
/// Can be told to answer "no data yet" a number of times before producing
/// a result, to exercise the signer's polling.
#[derive(Debug, Default)]
pub struct LocalHasher {
    pending_polls: AtomicU32,
    calls: AtomicU32,
}

impl LocalHasher {
    /// Hasher that answers on the first call.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher that returns no data for the first `polls` calls.
    pub fn with_pending_polls(polls: u32) -> Self {
        Self {
            pending_polls: AtomicU32::new(polls),
            calls: AtomicU32::new(0),
        }
    }

    /// Number of `hash` calls received.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Compute the hash values directly.
    pub fn compute(
        location_bytes: &[u8],
        request_bytes: &[Vec<u8>],
        auth_bytes: &[u8],
    ) -> HashResult {
        let location_auth = [auth_bytes, location_bytes];
        HashResult {
            location_auth_hash: digest_u32(b"SIGFORGE_LOCATION_AUTH_V1", &location_auth),
            location_hash: digest_u32(b"SIGFORGE_LOCATION_V1", &[location_bytes]),
            request_hashes: request_bytes
                .iter()
                .map(|request| {
                    digest_u64(b"SIGFORGE_REQUEST_V1", &[auth_bytes, request.as_slice()])
                })
                .collect(),
        }
    }
}

#[async_trait]
impl HashingOracle for LocalHasher {
    async fn hash(
        &self,
        _envelope: &RequestEnvelope,
        _signature: &Signature,
        location_bytes: &[u8],
        request_bytes: &[Vec<u8>],
        auth_bytes: &[u8],
    ) -> Result<Option<HashResult>, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let pending = self
            .pending_polls
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if pending.is_ok() {
            return Ok(None);
        }

        Ok(Some(Self::compute(location_bytes, request_bytes, auth_bytes)))
    }

    fn client_constant(&self) -> i64 {
        LOCAL_CLIENT_CONSTANT
    }
}

/// SHA-256 keystream cipher stand-in.
///
/// Output is the big-endian timestamp followed by the payload XORed with
/// `SHA-256(key || timestamp || block_index)` blocks.
#[derive(Debug, Clone)]
pub struct LocalCipher {
    key: [u8; 32],
}

impl LocalCipher {
    /// Cipher with a fixed key.
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    fn apply_keystream(&self, timestamp: u32, data: &mut [u8]) {
        let ts = timestamp.to_be_bytes();
        for (index, chunk) in data.chunks_mut(32).enumerate() {
            let counter = (index as u64).to_le_bytes();
            let block = digest(b"SIGFORGE_CIPHER_V1", &[&self.key[..], &ts[..], &counter[..]]);
            for (byte, k) in chunk.iter_mut().zip(block.iter()) {
                *byte ^= k;
            }
        }
    }

    /// Reverse [`encrypt`](EncryptionOracle::encrypt): returns the timestamp and plaintext.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<(u32, Vec<u8>), OracleError> {
        if ciphertext.len() < TIMESTAMP_PREFIX {
            return Err(OracleError::Failed("ciphertext shorter than timestamp prefix".into()));
        }
        let (prefix, body) = ciphertext.split_at(TIMESTAMP_PREFIX);
        let timestamp = u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);
        let mut plain = body.to_vec();
        self.apply_keystream(timestamp, &mut plain);
        Ok((timestamp, plain))
    }
}

#[async_trait]
impl EncryptionOracle for LocalCipher {
    async fn encrypt(
        &self,
        signature: &[u8],
        timestamp_since_start: u32,
    ) -> Result<Vec<u8>, OracleError> {
        let mut out = Vec::with_capacity(TIMESTAMP_PREFIX + signature.len());
        out.extend_from_slice(&timestamp_since_start.to_be_bytes());
        let mut body = signature.to_vec();
        self.apply_keystream(timestamp_since_start, &mut body);
        out.extend_from_slice(&body);
        Ok(out)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_and_ordered() {
        let requests = vec![vec![1u8, 2], vec![3u8]];
        let a = LocalHasher::compute(&[9; 24], &requests, b"auth");
        let b = LocalHasher::compute(&[9; 24], &requests, b"auth");
        assert_eq!(a, b);
        assert_eq!(a.request_hashes.len(), 2);
        assert_ne!(a.request_hashes[0], a.request_hashes[1]);

        let other_auth = LocalHasher::compute(&[9; 24], &requests, b"other");
        assert_ne!(a.location_auth_hash, other_auth.location_auth_hash);
        assert_eq!(a.location_hash, other_auth.location_hash);
    }

    #[tokio::test]
    async fn test_cipher_roundtrip_and_prefix() {
        let cipher = LocalCipher::new([7; 32]);
        let plain: Vec<u8> = (0..100).collect();

        let sealed = cipher.encrypt(&plain, 1500).await.unwrap();
        assert_eq!(&sealed[..4], &1500u32.to_be_bytes());
        assert_ne!(&sealed[4..], plain.as_slice());

        let (ts, opened) = cipher.decrypt(&sealed).unwrap();
        assert_eq!(ts, 1500);
        assert_eq!(opened, plain);
    }

    #[test]
    fn test_decrypt_rejects_short_input() {
        let cipher = LocalCipher::new([0; 32]);
        assert!(matches!(cipher.decrypt(&[1, 2]), Err(OracleError::Failed(_))));
    }

    #[tokio::test]
    async fn test_pending_polls_then_result() {
        let hasher = LocalHasher::with_pending_polls(2);
        let envelope = RequestEnvelope::default();
        let signature = Signature::default();

        for _ in 0..2 {
            let r = hasher.hash(&envelope, &signature, &[0; 24], &[], &[]).await.unwrap();
            assert!(r.is_none());
        }
        let r = hasher.hash(&envelope, &signature, &[0; 24], &[], &[]).await.unwrap();
        assert!(r.is_some());
        assert_eq!(hasher.call_count(), 3);
    }
}

//! Signature Signing Pipeline
//!
//! Drives one signature through the external oracles:
//!
//! ```text
//! BUILDING ──▶ HASHING ──▶ ENCRYPTING ──▶ DONE
//!                 │  ▲
//!                 │  └── no data yet: poll again
//!                 ▼
//!               FAILED
//! ```
//!
//! A signer belongs to one session and refuses to sign for any other. Its
//! mutable state (last elapsed time,
//! sequence counter) sits behind a lock held for the whole BUILDING step,
//! so the elapsed time, the fixes and the coordinate update always come
//! from the same synthesis.
//!
//! The hashing poll loop is unbounded unless
//! [`SignerConfig::max_hash_attempts`] is set. Callers that need a deadline
//! must wrap [`Signer::sign`] in their own timeout.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::clock::{Clock, SystemClock};
use crate::network::protocol::{to_canonical_bytes, PlatformRequest, RequestEnvelope};
use crate::network::session::Session;
use crate::oracle::{EncryptionOracle, HashResult, HashingOracle, OracleError};
use super::assembler::{SignatureAssembler, SESSION_HASH_LEN};
use super::types::Signature;

/// Signer configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignerConfig {
    /// Maximum hashing calls per signature. `None` polls until the oracle
    /// answers or fails.
    pub max_hash_attempts: Option<u32>,
    /// Delay between "no data yet" polls. Zero yields to the scheduler.
    pub hash_poll_interval: Duration,
}

impl SignerConfig {
    /// Create config from environment variables.
    ///
    /// - `SIGFORGE_MAX_HASH_ATTEMPTS`: positive integer bound on hashing calls
    /// - `SIGFORGE_HASH_POLL_MS`: milliseconds between polls
    ///
    /// Unset or unparsable values keep the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_hash_attempts: std::env::var("SIGFORGE_MAX_HASH_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|&n| n > 0)
                .or(defaults.max_hash_attempts),
            hash_poll_interval: std::env::var("SIGFORGE_HASH_POLL_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.hash_poll_interval),
        }
    }
}

/// Pipeline phases, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerPhase {
    /// Assembling the signature.
    Building,
    /// Waiting on the hashing oracle.
    Hashing,
    /// Waiting on the encryption oracle.
    Encrypting,
    /// Platform request produced.
    Done,
    /// Stopped on an error.
    Failed,
}

impl fmt::Display for SignerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Building => "BUILDING",
            Self::Hashing => "HASHING",
            Self::Encrypting => "ENCRYPTING",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Signing errors.
#[derive(Debug, Error)]
pub enum SignerError {
    /// The signer was built without a required collaborator.
    #[error("configuration error: {0}")]
    Configuration(&'static str),

    /// The session passed to `sign` is not the one the signer was built for.
    #[error("signer belongs to session {expected}, got {actual}")]
    SessionMismatch {
        /// Session the signer was created with.
        expected: Uuid,
        /// Session that was passed in.
        actual: Uuid,
    },

    /// The hashing oracle timed out.
    #[error("hashing service unavailable: {0}")]
    HashingUnavailable(#[source] OracleError),

    /// The hashing oracle refused the request.
    #[error("hashing rejected: {0}")]
    HashingRejected(String),

    /// Any other hashing failure.
    #[error("hashing failed")]
    HashingFailure(#[source] OracleError),

    /// The oracle kept answering "no data yet" until the attempt bound.
    #[error("no hash data after {attempts} attempts")]
    NoHashData {
        /// Calls made.
        attempts: u32,
    },

    /// The encryption oracle failed.
    #[error("encryption failed")]
    Encryption(#[source] OracleError),

    /// Canonical encoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

impl SignerError {
    fn from_hashing(err: OracleError) -> Self {
        match err {
            OracleError::Timeout(_) => Self::HashingUnavailable(err),
            OracleError::Rejected(reason) => Self::HashingRejected(reason),
            OracleError::Failed(_) => Self::HashingFailure(err),
        }
    }
}

/// Everything a successful signing produced.
#[derive(Debug, Clone)]
pub struct SignOutcome {
    /// Record to attach to the outgoing envelope.
    pub platform_request: PlatformRequest,
    /// Fully populated signature, as encrypted.
    pub signature: Signature,
    /// Hashing calls made (including "no data yet" polls).
    pub hash_attempts: u32,
}

/// Per-session signing pipeline.
pub struct Signer {
    config: SignerConfig,
    hasher: Option<Arc<dyn HashingOracle>>,
    cipher: Arc<dyn EncryptionOracle>,
    clock: Arc<dyn Clock>,
    session_id: Uuid,
    session_hash: [u8; SESSION_HASH_LEN],
    assembler: Mutex<SignatureAssembler>,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("config", &self.config)
            .field("session_id", &self.session_id)
            .field("hasher_configured", &self.hasher.is_some())
            .field("session_hash", &hex::encode(self.session_hash))
            .finish_non_exhaustive()
    }
}

impl Signer {
    /// Create a signer for `session`, with its clock starting now.
    pub fn new(
        session: &mut Session,
        hasher: Option<Arc<dyn HashingOracle>>,
        cipher: Arc<dyn EncryptionOracle>,
        config: SignerConfig,
    ) -> Self {
        Self::with_clock(session, hasher, cipher, Arc::new(SystemClock::start()), config)
    }

    /// Create a signer with an explicit clock.
    pub fn with_clock(
        session: &mut Session,
        hasher: Option<Arc<dyn HashingOracle>>,
        cipher: Arc<dyn EncryptionOracle>,
        clock: Arc<dyn Clock>,
        config: SignerConfig,
    ) -> Self {
        let assembler = SignatureAssembler::new(&mut session.rng);
        let session_hash = *assembler.session_hash();

        debug!(
            session_id = %session.id(),
            session_hash = %hex::encode(session_hash),
            "signer created"
        );

        Self {
            config,
            hasher,
            cipher,
            clock,
            session_id: session.id(),
            session_hash,
            assembler: Mutex::new(assembler),
        }
    }

    /// Id of the session this signer signs for.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The fixed per-session hash.
    pub fn session_hash(&self) -> &[u8; SESSION_HASH_LEN] {
        &self.session_hash
    }

    /// Milliseconds since this signer was created.
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed_ms()
    }

    /// Sign an outgoing envelope and return the platform record.
    ///
    /// Side effects: the session's coordinate accuracy/altitude and the
    /// envelope's `accuracy` / `ms_since_last_locationfix` are updated.
    pub async fn generate(
        &self,
        session: &mut Session,
        envelope: &mut RequestEnvelope,
    ) -> Result<PlatformRequest, SignerError> {
        self.sign(session, envelope).await.map(|outcome| outcome.platform_request)
    }

    /// Like [`generate`](Self::generate), also returning the signature.
    ///
    /// `session` must be the session this signer was created with;
    /// any other gives [`SignerError::SessionMismatch`].
    pub async fn sign(
        &self,
        session: &mut Session,
        envelope: &mut RequestEnvelope,
    ) -> Result<SignOutcome, SignerError> {
        // Checked before touching the clock or the session's rng.
        if session.id() != self.session_id {
            return Err(SignerError::SessionMismatch {
                expected: self.session_id,
                actual: session.id(),
            });
        }
        let hasher = self
            .hasher
            .as_ref()
            .ok_or(SignerError::Configuration("no hashing oracle configured"))?;

        // BUILDING
        let (mut signature, location_bytes) = {
            let mut assembler = self.assembler.lock().await;
            let elapsed = self.clock.elapsed_ms();
            let assembly = assembler.assemble(
                elapsed,
                self.clock.unix_millis(),
                &session.player,
                &session.device_info,
                hasher.client_constant(),
                &mut session.rng,
            );

            session.apply_coordinate_update(&assembly.coordinate_update);
            envelope.accuracy = assembly.envelope_accuracy();
            envelope.ms_since_last_locationfix = assembly.ms_since_last_fix;

            debug!(
                phase = %SignerPhase::Building,
                elapsed,
                fixes = assembly.signature.location_fix.len(),
                sequence_id = assembly.signature.sequence_id,
                "signature assembled"
            );
            (assembly.signature, session.player.location_bytes())
        };

        let request_bytes = envelope.request_bytes()?;
        let auth_bytes = envelope.auth_bytes()?;

        // HASHING
        let (hash, hash_attempts) = self
            .poll_hash(
                hasher.as_ref(),
                envelope,
                &signature,
                &location_bytes,
                &request_bytes,
                &auth_bytes,
            )
            .await?;

        signature.location_hash1 = hash.location_auth_hash;
        signature.location_hash2 = hash.location_hash;
        signature.request_hash.extend(hash.request_hashes);

        // ENCRYPTING
        debug!(phase = %SignerPhase::Encrypting, "encrypting signature");
        let signature_bytes = to_canonical_bytes(&signature)?;
        // The oracle takes a 32-bit timestamp; longer sessions wrap.
        let timestamp = signature.timestamp_since_start as u32;
        let ciphertext = self
            .cipher
            .encrypt(&signature_bytes, timestamp)
            .await
            .map_err(|e| {
                warn!(phase = %SignerPhase::Failed, error = %e, "encryption oracle failed");
                SignerError::Encryption(e)
            })?;

        info!(
            phase = %SignerPhase::Done,
            sequence_id = signature.sequence_id,
            hash_attempts,
            ciphertext_len = ciphertext.len(),
            "signature ready"
        );

        Ok(SignOutcome {
            platform_request: PlatformRequest::encrypted_signature(ciphertext),
            signature,
            hash_attempts,
        })
    }

    /// Call the hashing oracle until it produces data, fails, or the
    /// configured attempt bound runs out.
    async fn poll_hash(
        &self,
        hasher: &dyn HashingOracle,
        envelope: &RequestEnvelope,
        signature: &Signature,
        location_bytes: &[u8],
        request_bytes: &[Vec<u8>],
        auth_bytes: &[u8],
    ) -> Result<(HashResult, u32), SignerError> {
        let mut attempts = 0u32;
        loop {
            attempts = attempts.saturating_add(1);
            debug!(phase = %SignerPhase::Hashing, attempts, "calling hashing oracle");

            match hasher
                .hash(envelope, signature, location_bytes, request_bytes, auth_bytes)
                .await
            {
                Ok(Some(result)) => return Ok((result, attempts)),
                Ok(None) => {
                    if let Some(max) = self.config.max_hash_attempts {
                        if attempts >= max {
                            warn!(
                                phase = %SignerPhase::Failed,
                                attempts,
                                "hashing oracle never produced data"
                            );
                            return Err(SignerError::NoHashData { attempts });
                        }
                    }
                    debug!(attempts, "hashing oracle has no data yet, polling again");
                    if self.config.hash_poll_interval.is_zero() {
                        tokio::task::yield_now().await;
                    } else {
                        tokio::time::sleep(self.config.hash_poll_interval).await;
                    }
                }
                Err(e) => {
                    warn!(phase = %SignerPhase::Failed, error = %e, "hashing oracle failed");
                    return Err(SignerError::from_hashing(e));
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::core::rng::DeterministicRng;
    use crate::network::protocol::{AuthInfo, PlatformRequestType, Request};
    use crate::oracle::{LocalCipher, LocalHasher};
    use crate::signature::types::{DeviceInfo, PlayerCoordinate};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Hasher that replays a script of responses, then repeats the last.
    struct ScriptedHasher {
        script: std::sync::Mutex<VecDeque<Result<Option<HashResult>, OracleError>>>,
        calls: AtomicU32,
    }

    impl ScriptedHasher {
        fn new(script: Vec<Result<Option<HashResult>, OracleError>>) -> Self {
            Self {
                script: std::sync::Mutex::new(script.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl HashingOracle for ScriptedHasher {
        async fn hash(
            &self,
            _envelope: &RequestEnvelope,
            _signature: &Signature,
            _location_bytes: &[u8],
            _request_bytes: &[Vec<u8>],
            _auth_bytes: &[u8],
        ) -> Result<Option<HashResult>, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                script.front().cloned().unwrap_or(Ok(None))
            }
        }

        fn client_constant(&self) -> i64 {
            -8_408_506_833_887_075_802
        }
    }

    /// Cipher that counts calls and optionally fails.
    struct CountingCipher {
        calls: AtomicU32,
        fail: bool,
    }

    impl CountingCipher {
        fn new(fail: bool) -> Self {
            Self { calls: AtomicU32::new(0), fail }
        }
    }

    #[async_trait]
    impl EncryptionOracle for CountingCipher {
        async fn encrypt(&self, signature: &[u8], _ts: u32) -> Result<Vec<u8>, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(OracleError::Failed("cipher offline".into()))
            } else {
                Ok(signature.iter().rev().copied().collect())
            }
        }
    }

    fn hash_result(requests: usize) -> HashResult {
        HashResult {
            location_auth_hash: 0xAABB_CCDD,
            location_hash: 0x1122_3344,
            request_hashes: (0..requests as u64).map(|i| 1000 + i).collect(),
        }
    }

    fn session(seed: u64) -> Session {
        Session::new(
            DeterministicRng::new(seed),
            PlayerCoordinate::new(37.7749, -122.4194),
            DeviceInfo {
                device_id: "feedface".into(),
                ..Default::default()
            },
        )
    }

    fn envelope() -> RequestEnvelope {
        let mut envelope = RequestEnvelope::new(vec![
            Request::new(2, vec![1, 2, 3]),
            Request::new(126, vec![]),
            Request::new(4, vec![9]),
        ]);
        envelope.auth_info = Some(AuthInfo {
            provider: "ptc".into(),
            token: "abc".into(),
        });
        envelope
    }

    fn clock_at(ms: u64) -> Arc<ManualClock> {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        clock.advance(ms);
        clock
    }

    #[tokio::test]
    async fn test_missing_hasher_is_configuration_error() {
        let mut session = session(1);
        let clock = clock_at(1500);
        let cipher = Arc::new(CountingCipher::new(false));
        let signer =
            Signer::with_clock(&mut session, None, cipher.clone(), clock, SignerConfig::default());

        let rng_before = session.rng.state();
        let player_before = session.player;
        let mut env = envelope();

        let result = signer.generate(&mut session, &mut env).await;

        assert!(matches!(result, Err(SignerError::Configuration(_))));
        assert_eq!(session.rng.state(), rng_before);
        assert_eq!(session.player, player_before);
        assert_eq!(signer.assembler.lock().await.last_elapsed(), 0);
        assert_eq!(cipher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_other_session_is_refused() {
        let mut owner = session(20);
        let mut stranger = session(20);
        let hasher = Arc::new(ScriptedHasher::new(vec![Ok(Some(hash_result(3)))]));
        let signer = Signer::with_clock(
            &mut owner,
            Some(hasher.clone()),
            Arc::new(CountingCipher::new(false)),
            clock_at(5000),
            SignerConfig::default(),
        );

        let rng_before = stranger.rng.state();
        let mut env = envelope();
        let result = signer.sign(&mut stranger, &mut env).await;

        match result {
            Err(SignerError::SessionMismatch { expected, actual }) => {
                assert_eq!(expected, owner.id());
                assert_eq!(actual, stranger.id());
            }
            other => panic!("expected session mismatch, got {other:?}"),
        }
        assert_eq!(stranger.rng.state(), rng_before);
        assert_eq!(hasher.calls(), 0);
        assert_eq!(signer.assembler.lock().await.last_elapsed(), 0);

        // The owning session still signs.
        assert_eq!(signer.session_id(), owner.id());
        assert!(signer.sign(&mut owner, &mut env).await.is_ok());
    }

    #[tokio::test]
    async fn test_null_then_result_makes_two_calls() {
        let mut session = session(2);
        let hasher = Arc::new(ScriptedHasher::new(vec![Ok(None), Ok(Some(hash_result(3)))]));
        let signer = Signer::with_clock(
            &mut session,
            Some(hasher.clone()),
            Arc::new(CountingCipher::new(false)),
            clock_at(5000),
            SignerConfig::default(),
        );

        let mut env = envelope();
        let outcome = signer.sign(&mut session, &mut env).await.unwrap();

        assert_eq!(hasher.calls(), 2);
        assert_eq!(outcome.hash_attempts, 2);
        assert_eq!(outcome.signature.location_hash1, 0xAABB_CCDD);
        assert_eq!(outcome.signature.location_hash2, 0x1122_3344);
        assert_eq!(outcome.signature.request_hash, vec![1000, 1001, 1002]);
        assert_eq!(outcome.signature.hasher_constant, -8_408_506_833_887_075_802);
    }

    #[tokio::test]
    async fn test_timeout_is_unavailable_and_skips_encryption() {
        let mut session = session(3);
        let timeout = OracleError::Timeout(Duration::from_secs(5));
        let hasher = Arc::new(ScriptedHasher::new(vec![Err(timeout)]));
        let cipher = Arc::new(CountingCipher::new(false));
        let signer = Signer::with_clock(
            &mut session,
            Some(hasher.clone()),
            cipher.clone(),
            clock_at(5000),
            SignerConfig::default(),
        );

        let result = signer.generate(&mut session, &mut envelope()).await;

        assert!(matches!(result, Err(SignerError::HashingUnavailable(OracleError::Timeout(_)))));
        assert_eq!(hasher.calls(), 1);
        assert_eq!(cipher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generic_failure_preserves_cause() {
        let mut session = session(4);
        let hasher = Arc::new(ScriptedHasher::new(vec![Err(OracleError::Failed("502".into()))]));
        let signer = Signer::with_clock(
            &mut session,
            Some(hasher),
            Arc::new(CountingCipher::new(false)),
            clock_at(5000),
            SignerConfig::default(),
        );

        let err = signer.generate(&mut session, &mut envelope()).await.unwrap_err();

        match &err {
            SignerError::HashingFailure(OracleError::Failed(cause)) => assert_eq!(cause, "502"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_rejection_passes_through() {
        let mut session = session(5);
        let rejected = OracleError::Rejected("key expired".into());
        let hasher = Arc::new(ScriptedHasher::new(vec![Err(rejected)]));
        let signer = Signer::with_clock(
            &mut session,
            Some(hasher),
            Arc::new(CountingCipher::new(false)),
            clock_at(5000),
            SignerConfig::default(),
        );

        let err = signer.generate(&mut session, &mut envelope()).await.unwrap_err();
        assert!(matches!(err, SignerError::HashingRejected(ref r) if r == "key expired"));
    }

    #[tokio::test]
    async fn test_bounded_polling_gives_up() {
        let mut session = session(6);
        let hasher = Arc::new(ScriptedHasher::new(vec![Ok(None)]));
        let config = SignerConfig {
            max_hash_attempts: Some(4),
            ..Default::default()
        };
        let signer = Signer::with_clock(
            &mut session,
            Some(hasher.clone()),
            Arc::new(CountingCipher::new(false)),
            clock_at(5000),
            config,
        );

        let err = signer.generate(&mut session, &mut envelope()).await.unwrap_err();

        assert!(matches!(err, SignerError::NoHashData { attempts: 4 }));
        assert_eq!(hasher.calls(), 4);
    }

    #[tokio::test]
    async fn test_encryption_failure_is_wrapped() {
        let mut session = session(7);
        let hasher = Arc::new(ScriptedHasher::new(vec![Ok(Some(hash_result(3)))]));
        let signer = Signer::with_clock(
            &mut session,
            Some(hasher),
            Arc::new(CountingCipher::new(true)),
            clock_at(5000),
            SignerConfig::default(),
        );

        let err = signer.generate(&mut session, &mut envelope()).await.unwrap_err();
        assert!(matches!(err, SignerError::Encryption(OracleError::Failed(_))));
    }

    #[tokio::test]
    async fn test_side_effects_match_signature() {
        let mut session = session(8);
        let clock = clock_at(42_000);
        let signer = Signer::with_clock(
            &mut session,
            Some(Arc::new(LocalHasher::new())),
            Arc::new(LocalCipher::new([3; 32])),
            clock,
            SignerConfig::default(),
        );

        let mut env = envelope();
        let outcome = signer.sign(&mut session, &mut env).await.unwrap();
        let last = outcome.signature.location_fix.last().unwrap();

        assert_eq!(session.player.horizontal_accuracy, f64::from(last.horizontal_accuracy));
        assert_eq!(session.player.vertical_accuracy, f64::from(last.vertical_accuracy));
        assert_eq!(session.player.altitude, f64::from(last.altitude));
        assert_eq!(env.accuracy, session.player.altitude);
        assert_eq!(env.ms_since_last_locationfix, 42_000 - last.timestamp_snapshot);
        assert_eq!(outcome.signature.timestamp_since_start, 42_000);
        assert_eq!(outcome.signature.timestamp, 1_700_000_042_000);
    }

    #[tokio::test]
    async fn test_hash_inputs_and_ciphertext_roundtrip() {
        let mut session = session(9);
        let cipher = Arc::new(LocalCipher::new([5; 32]));
        let signer = Signer::with_clock(
            &mut session,
            Some(Arc::new(LocalHasher::with_pending_polls(1))),
            cipher.clone(),
            clock_at(7_500),
            SignerConfig::default(),
        );

        let mut env = envelope();
        let outcome = signer.sign(&mut session, &mut env).await.unwrap();
        assert_eq!(outcome.hash_attempts, 2);

        // Hashes were computed over the updated coordinate and the envelope's bytes.
        let expected = LocalHasher::compute(
            &session.player.location_bytes(),
            &env.request_bytes().unwrap(),
            &env.auth_bytes().unwrap(),
        );
        assert_eq!(outcome.signature.location_hash1, expected.location_auth_hash);
        assert_eq!(outcome.signature.location_hash2, expected.location_hash);
        assert_eq!(outcome.signature.request_hash, expected.request_hashes);

        // Ciphertext carries the canonical bytes of the final signature.
        let record = &outcome.platform_request;
        assert_eq!(record.request_type, PlatformRequestType::SendEncryptedSignature);
        let (ts, plain) = cipher.decrypt(&record.request_message).unwrap();
        assert_eq!(ts, 7_500);
        let decoded: Signature = bincode::deserialize(&plain).unwrap();
        assert_eq!(decoded, outcome.signature);
    }

    #[tokio::test]
    async fn test_session_hash_stable_and_state_advances() {
        let mut session = session(10);
        let clock = clock_at(1_000);
        let signer = Signer::with_clock(
            &mut session,
            Some(Arc::new(LocalHasher::new())),
            Arc::new(LocalCipher::new([1; 32])),
            clock.clone(),
            SignerConfig::default(),
        );

        let mut last_elapsed = 0;
        let mut sequence_ids = Vec::new();
        for _ in 0..5 {
            clock.advance(2_300);
            let outcome = signer.sign(&mut session, &mut envelope()).await.unwrap();
            assert_eq!(&outcome.signature.session_hash, signer.session_hash());
            assert!(outcome.signature.timestamp_since_start >= last_elapsed);
            last_elapsed = outcome.signature.timestamp_since_start;
            sequence_ids.push(outcome.signature.sequence_id);
        }

        sequence_ids.sort_unstable();
        sequence_ids.dedup();
        assert_eq!(sequence_ids.len(), 5);
        assert_eq!(signer.elapsed_ms(), 12_500);
    }

    #[test]
    fn test_config_defaults_unbounded() {
        let config = SignerConfig::default();
        assert_eq!(config.max_hash_attempts, None);
        assert!(config.hash_poll_interval.is_zero());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(SignerPhase::Hashing.to_string(), "HASHING");
        assert_eq!(SignerPhase::Failed.to_string(), "FAILED");
    }
}

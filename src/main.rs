//! Sigforge demo
//!
//! Signs a handful of envelopes for a simulated session against the local
//! development oracles and logs what was produced.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use sigforge::{
    network::protocol::{AuthInfo, Request, RequestEnvelope},
    oracle::{LocalCipher, LocalHasher},
    signature::types::{DeviceInfo, PlayerCoordinate},
    Session, Signer, SignerConfig, VERSION,
};

/// Number of envelopes signed by the demo.
const DEMO_CALLS: usize = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Sigforge v{}", VERSION);

    demo_session().await
}

/// Run a short session of signed calls.
async fn demo_session() -> anyhow::Result<()> {
    info!("=== Starting Demo Session ===");

    let device_info = DeviceInfo {
        device_id: Uuid::new_v4().simple().to_string(),
        device_brand: "Apple".into(),
        device_model: "iPhone".into(),
        device_model_boot: "iPhone10,2".into(),
        hardware_manufacturer: "Apple".into(),
        hardware_model: "D21AP".into(),
        firmware_brand: "iPhone OS".into(),
        firmware_type: "11.2.6".into(),
    };
    let mut session = Session::from_entropy(PlayerCoordinate::new(40.7580, -73.9855), device_info);

    let config = SignerConfig {
        max_hash_attempts: Some(10),
        ..SignerConfig::from_env()
    };
    let hasher = Arc::new(LocalHasher::with_pending_polls(1));
    let signer = Signer::new(
        &mut session,
        Some(hasher.clone()),
        Arc::new(LocalCipher::new(rand::random())),
        config,
    );

    info!("Session hash: {}", hex::encode(signer.session_hash()));

    for call in 0..DEMO_CALLS {
        tokio::time::sleep(Duration::from_millis(1200)).await;

        let mut envelope = RequestEnvelope::new(vec![
            Request::new(2, b"player".to_vec()),
            Request::new(126, Vec::new()),
        ]);
        envelope.auth_info = Some(AuthInfo {
            provider: "ptc".into(),
            token: "demo-token".into(),
        });

        let outcome = signer.sign(&mut session, &mut envelope).await?;
        let signature = &outcome.signature;

        info!(
            "Call {}: elapsed {} ms, {} fixes, sequence {}, {} hash attempts, {} byte ciphertext",
            call,
            signature.timestamp_since_start,
            signature.location_fix.len(),
            signature.sequence_id,
            outcome.hash_attempts,
            outcome.platform_request.request_message.len(),
        );
        info!(
            "Player accuracy now {:.2} m / {:.2} m, altitude {:.2} m",
            session.player.horizontal_accuracy,
            session.player.vertical_accuracy,
            session.player.altitude,
        );

        if call + 1 == DEMO_CALLS {
            info!("Final signature:\n{}", serde_json::to_string_pretty(signature)?);
        }

        envelope.push_platform_request(outcome.platform_request);
    }

    info!("Hashing oracle calls: {}", hasher.call_count());
    Ok(())
}

//! Outgoing RPC Envelope
//!
//! The subset of the outgoing request envelope the signer reads and writes.
//! Building and dispatching the envelope belongs to the transport layer.
//! Canonical bytes of every structure are produced by bincode, in field
//! declaration order.

use serde::{Serialize, Deserialize};

/// Encode a value to its canonical byte form.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, bincode::Error> {
    bincode::serialize(value)
}

/// One RPC request inside the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Request type id.
    pub request_type: u32,
    /// Encoded request message.
    pub request_message: Vec<u8>,
}

impl Request {
    /// Create a request.
    pub fn new(request_type: u32, request_message: Vec<u8>) -> Self {
        Self {
            request_type,
            request_message,
        }
    }
}

/// Server-issued session ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTicket {
    /// Opaque ticket start bytes.
    pub start: Vec<u8>,
    /// Expiry, Unix milliseconds.
    pub expire_timestamp_ms: u64,
    /// Opaque ticket end bytes.
    pub end: Vec<u8>,
}

/// Login credentials, used until a ticket has been issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    /// Identity provider name.
    pub provider: String,
    /// Provider access token.
    pub token: String,
}

/// Platform request types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum PlatformRequestType {
    /// Carries the encrypted signature.
    SendEncryptedSignature = 6,
}

/// A platform-level record attached to the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformRequest {
    /// Record type.
    pub request_type: PlatformRequestType,
    /// Payload.
    pub request_message: Vec<u8>,
}

impl PlatformRequest {
    /// Wrap an encrypted signature.
    pub fn encrypted_signature(ciphertext: Vec<u8>) -> Self {
        Self {
            request_type: PlatformRequestType::SendEncryptedSignature,
            request_message: ciphertext,
        }
    }
}

/// The outgoing request envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Requests, in submission order.
    pub requests: Vec<Request>,
    /// Session ticket, once issued.
    pub auth_ticket: Option<AuthTicket>,
    /// Login credentials, before a ticket exists.
    pub auth_info: Option<AuthInfo>,
    /// Reported location accuracy.
    pub accuracy: f64,
    /// Milliseconds since the last location fix.
    pub ms_since_last_locationfix: u64,
    /// Platform records (signature, etc).
    pub platform_requests: Vec<PlatformRequest>,
}

impl RequestEnvelope {
    /// Envelope carrying the given requests.
    pub fn new(requests: Vec<Request>) -> Self {
        Self {
            requests,
            ..Default::default()
        }
    }

    /// Canonical bytes of each request, in order.
    pub fn request_bytes(&self) -> Result<Vec<Vec<u8>>, bincode::Error> {
        self.requests.iter().map(to_canonical_bytes).collect()
    }

    /// Canonical bytes of the ticket if present, else of the auth info.
    ///
    /// Empty when neither is set.
    pub fn auth_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        match (&self.auth_ticket, &self.auth_info) {
            (Some(ticket), _) => to_canonical_bytes(ticket),
            (None, Some(info)) => to_canonical_bytes(info),
            (None, None) => Ok(Vec::new()),
        }
    }

    /// Attach a platform record.
    pub fn push_platform_request(&mut self, request: PlatformRequest) {
        self.platform_requests.push(request);
    }
}

// =============================================================================
// TESTS
// =============================================================================

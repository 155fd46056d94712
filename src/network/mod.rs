//! Network-facing types.
//!
//! ## Module Structure
//!
//! - `protocol`: Outgoing request envelope and platform records
//! - `session`: Caller-owned session state

pub mod protocol;
pub mod session;

pub use protocol::{
    to_canonical_bytes, AuthInfo, AuthTicket, PlatformRequest, PlatformRequestType, Request,
    RequestEnvelope,
};
pub use session::Session;

//! Transport trait definition.
//!
//! Uses native `async fn` in traits (Edition 2024 RPITIT); no `async_trait`
//! macro required.

use x402_core::{DeviceConfig, Result};

/// Raw result of one poll round-trip.
///
/// The transport reports the HTTP status and body verbatim; interpretation
/// (402 semantics, field extraction) belongs to the session core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResponse {
    /// HTTP status code as received.
    pub status_code: u16,

    /// Response body as received, size-capped at the transport boundary.
    pub body: String,
}

impl PollResponse {
    /// Convenience constructor for tests and mocks.
    #[must_use]
    pub fn new(status_code: u16, body: &str) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }
}

/// One poll against the backend.
///
/// Implementations own all radio/TLS/HTTP framing concerns. A returned
/// error means "no usable response"; the caller must hold session state
/// and retry later, never synthesize a verdict from a failed poll.
pub trait PollTransport {
    /// Ask the backend for the current session state of this device.
    async fn poll(&mut self, config: &DeviceConfig) -> Result<PollResponse>;
}

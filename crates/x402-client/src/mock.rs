//! Scriptable transport for tests and device emulation.
//!
//! [`MockTransport`] replays a FIFO of responses and failures queued
//! through its handle, so a test can walk the session machine through an
//! entire payment cycle without a backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use x402_core::{DeviceConfig, Error, Result};

use crate::traits::{PollResponse, PollTransport};

type Script = Arc<Mutex<VecDeque<Result<PollResponse>>>>;

/// Mock transport replaying scripted poll results.
///
/// An exhausted script reports a transport failure, which the polling
/// policy treats like any other network problem (hold state, retry).
///
/// # Examples
///
/// ```
/// use x402_client::{MockTransport, PollTransport};
/// use x402_core::DeviceConfig;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> x402_core::Result<()> {
/// let config = DeviceConfig::builder("dev-1", "secret").build()?;
/// let (mut transport, handle) = MockTransport::new();
///
/// handle.push_response(402, r#"{"token":"USDC","amount":0.25}"#);
/// handle.push_response(200, r#"{"accessGranted":true,"remainingSeconds":60}"#);
///
/// assert_eq!(transport.poll(&config).await?.status_code, 402);
/// assert_eq!(transport.poll(&config).await?.status_code, 200);
/// assert!(transport.poll(&config).await.is_err()); // script exhausted
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MockTransport {
    script: Script,
}

impl MockTransport {
    /// Create a transport plus the handle used to script it.
    #[must_use]
    pub fn new() -> (Self, MockTransportHandle) {
        let script: Script = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                script: Arc::clone(&script),
            },
            MockTransportHandle { script },
        )
    }
}

impl PollTransport for MockTransport {
    async fn poll(&mut self, _config: &DeviceConfig) -> Result<PollResponse> {
        let mut script = self
            .script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        script
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("mock script exhausted".to_string())))
    }
}

/// Handle for scripting a [`MockTransport`].
#[derive(Debug, Clone)]
pub struct MockTransportHandle {
    script: Script,
}

impl MockTransportHandle {
    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<PollResponse>>> {
        self.script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a successful poll result.
    pub fn push_response(&self, status_code: u16, body: &str) {
        self.lock().push_back(Ok(PollResponse::new(status_code, body)));
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, message: &str) {
        self.lock()
            .push_back(Err(Error::Transport(message.to_string())));
    }

    /// Number of scripted results not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DeviceConfig {
        DeviceConfig::builder("dev-1", "secret").build().unwrap()
    }

    #[tokio::test]
    async fn test_replays_in_fifo_order() {
        let (mut transport, handle) = MockTransport::new();
        handle.push_response(402, "{}");
        handle.push_failure("radio dropout");
        handle.push_response(200, r#"{"accessGranted":true}"#);

        assert_eq!(transport.poll(&config()).await.unwrap().status_code, 402);
        assert!(transport.poll(&config()).await.is_err());
        assert_eq!(transport.poll(&config()).await.unwrap().status_code, 200);
        assert_eq!(handle.remaining(), 0);
    }

    #[tokio::test]
    async fn test_exhausted_script_fails() {
        let (mut transport, _handle) = MockTransport::new();
        assert!(transport.poll(&config()).await.is_err());
    }
}

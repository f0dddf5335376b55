//! HTTPS transport over reqwest.
//!
//! One GET per poll against
//! `https://{host}:{port}/api/devices/{device_id}/session`, authenticated
//! with the `X-Device-Id` / `X-Device-Secret` headers. The exact endpoint
//! shape is isolated here on purpose: firmware talking to a different
//! backend layout only swaps this file, not the session core.

use std::time::Duration;

use tracing::{debug, warn};
use x402_core::{DeviceConfig, Error, Result, constants::MAX_RESPONSE_LENGTH};

use crate::traits::{PollResponse, PollTransport};

/// Default per-request timeout (milliseconds).
///
/// Matches the active poll cadence so a hung request never overlaps the
/// next scheduled poll.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 3000;

/// HTTPS implementation of [`PollTransport`].
///
/// # Examples
///
/// ```no_run
/// use x402_client::{HttpTransport, PollTransport};
/// use x402_core::DeviceConfig;
///
/// # async fn example() -> x402_core::Result<()> {
/// let config = DeviceConfig::builder("espresso-01", "s3cret").build()?;
/// let mut transport = HttpTransport::new()?;
///
/// let response = transport.poll(&config).await?;
/// println!("backend says: {} {}", response.status_code, response.body);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with the default request timeout.
    ///
    /// # Errors
    /// Returns `Error::Transport` if the underlying TLS/client setup fails.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS))
    }

    /// Create a transport with a custom request timeout.
    ///
    /// # Errors
    /// Returns `Error::Transport` if the underlying TLS/client setup fails.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Session endpoint for the configured device.
    fn session_url(config: &DeviceConfig) -> String {
        format!(
            "https://{}:{}/api/devices/{}/session",
            config.backend_host, config.backend_port, config.device_id
        )
    }
}

impl PollTransport for HttpTransport {
    async fn poll(&mut self, config: &DeviceConfig) -> Result<PollResponse> {
        let url = Self::session_url(config);
        debug!(%url, "polling backend");

        let response = self
            .client
            .get(&url)
            .header("X-Device-Id", &config.device_id)
            .header("X-Device-Secret", config.device_secret.expose())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(self.timeout.as_millis() as u64)
                } else {
                    Error::Transport(e.to_string())
                }
            })?;

        let status_code = response.status().as_u16();

        // Enforce the body cap before buffering the whole thing.
        if let Some(length) = response.content_length()
            && length as usize > MAX_RESPONSE_LENGTH
        {
            return Err(Error::ResponseTooLarge {
                limit: MAX_RESPONSE_LENGTH,
                actual: length as usize,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if body.len() > MAX_RESPONSE_LENGTH {
            warn!(actual = body.len(), "dropping oversized response body");
            return Err(Error::ResponseTooLarge {
                limit: MAX_RESPONSE_LENGTH,
                actual: body.len(),
            });
        }

        Ok(PollResponse { status_code, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_url_shape() {
        let config = DeviceConfig::builder("espresso-01", "s3cret")
            .backend_host("example.com")
            .backend_port(8443)
            .build()
            .unwrap();

        assert_eq!(
            HttpTransport::session_url(&config),
            "https://example.com:8443/api/devices/espresso-01/session"
        );
    }

    #[test]
    fn test_transport_construction() {
        assert!(HttpTransport::new().is_ok());
        assert!(HttpTransport::with_timeout(Duration::from_secs(1)).is_ok());
    }
}

use crate::{
    Result,
    constants::{
        DEFAULT_BACKEND_HOST, DEFAULT_BACKEND_PORT, DEFAULT_POLL_ACTIVE_MS, DEFAULT_POLL_IDLE_MS,
    },
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use subtle::ConstantTimeEq;

/// Kind of physical device this client runs on.
///
/// Display/logging only: the session protocol is identical for every
/// device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DeviceType {
    CoffeeMachine,
    BikeLock,
    DoorLock,
    PowerSwitch,
    EvCharger,
    Generic,
}

impl DeviceType {
    /// Human-readable label for display surfaces.
    ///
    /// Total over the enum: unrecognized/future variants fall back to
    /// `"Generic Device"` rather than failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use x402_core::DeviceType;
    ///
    /// assert_eq!(DeviceType::CoffeeMachine.label(), "Coffee Machine");
    /// assert_eq!(DeviceType::Generic.label(), "Generic Device");
    /// ```
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DeviceType::CoffeeMachine => "Coffee Machine",
            DeviceType::BikeLock => "Bike Lock",
            DeviceType::DoorLock => "Door Lock",
            DeviceType::PowerSwitch => "Power Switch",
            DeviceType::EvCharger => "EV Charger",
            _ => "Generic Device",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Payment currency that funded (or will fund) a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    /// No recognized currency tag in the backend response. Never inferred.
    Unknown,
    /// TSE token on Solana.
    Tse,
    /// USDC on Base.
    Usdc,
}

impl Currency {
    /// Map a wire tag (`"TSE"` / `"USDC"`) to a currency.
    ///
    /// Any other tag maps to [`Currency::Unknown`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "TSE" => Currency::Tse,
            "USDC" => Currency::Usdc,
            _ => Currency::Unknown,
        }
    }

    /// Wire tag as the backend sends it.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Tse => "TSE",
            Currency::Usdc => "USDC",
            Currency::Unknown => "UNKNOWN",
        }
    }

    /// Human-readable label including the settlement network.
    ///
    /// Total over the enum: anything outside the named set renders as
    /// `"Unknown"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use x402_core::Currency;
    ///
    /// assert_eq!(Currency::Tse.label(), "TSE (Solana)");
    /// assert_eq!(Currency::Usdc.label(), "USDC (Base)");
    /// assert_eq!(Currency::Unknown.label(), "Unknown");
    /// ```
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Currency::Tse => "TSE (Solana)",
            Currency::Usdc => "USDC (Base)",
            Currency::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Client-side belief about the current access session.
///
/// Derived state owned by the session state machine; poll results and clock
/// comparisons are the only things that move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No session was ever established.
    None,

    /// Backend answered 402 / `accessGranted:false`; waiting for a payment
    /// to clear.
    PaymentRequired,

    /// Access granted, time remaining on the clock.
    Active,

    /// The local clock passed the session expiry. Terminal: a fresh payment
    /// cycle is required to re-enter `Active`.
    Expired,

    /// Explicit termination by the user/app, or backend revocation.
    /// Terminal like `Expired`.
    Ended,
}

impl SessionStatus {
    /// Returns `true` for states that require a fresh payment cycle before
    /// access can be granted again.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Expired | SessionStatus::Ended)
    }

    /// Returns `true` while access is currently granted.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let status_str = match self {
            SessionStatus::None => "None",
            SessionStatus::PaymentRequired => "PaymentRequired",
            SessionStatus::Active => "Active",
            SessionStatus::Expired => "Expired",
            SessionStatus::Ended => "Ended",
        };
        write!(f, "{}", status_str)
    }
}

/// Shared secret identifying this device to the backend.
///
/// # Security
/// Implements constant-time comparison to prevent timing attacks, and a
/// redacting `Debug` so the secret never lands in logs.
#[derive(Clone, Eq, Serialize, Deserialize)]
pub struct DeviceSecret(String);

impl DeviceSecret {
    /// Wrap a secret string.
    ///
    /// # Errors
    /// Returns `Error::Config` if the secret is empty.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::Config("Device secret must not be empty".to_string()));
        }
        Ok(DeviceSecret(secret.to_string()))
    }

    /// Expose the secret for request signing. Callers must not log this.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl PartialEq for DeviceSecret {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl fmt::Debug for DeviceSecret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "DeviceSecret(****)")
    }
}

/// Device identity and polling configuration, immutable for the process
/// lifetime.
///
/// Construct through [`DeviceConfig::builder`]; the builder fills in the
/// fleet defaults for everything except identity.
///
/// # Examples
///
/// ```
/// use x402_core::{DeviceConfig, DeviceType};
///
/// let config = DeviceConfig::builder("espresso-01", "s3cret")
///     .device_type(DeviceType::CoffeeMachine)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.backend_port, 443);
/// assert_eq!(config.poll_interval_idle.as_millis(), 1500);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Backend-assigned device identifier.
    pub device_id: String,

    /// Shared secret for request authentication.
    pub device_secret: DeviceSecret,

    /// Backend host to poll.
    pub backend_host: String,

    /// Backend port (HTTPS).
    pub backend_port: u16,

    /// What kind of device this is. Display/logging only.
    pub device_type: DeviceType,

    /// Poll cadence while waiting for payment (or after expiry).
    pub poll_interval_idle: Duration,

    /// Poll cadence while a session is active.
    pub poll_interval_active: Duration,
}

impl DeviceConfig {
    /// Start building a configuration for the given device identity.
    pub fn builder(device_id: &str, device_secret: &str) -> DeviceConfigBuilder {
        DeviceConfigBuilder {
            device_id: device_id.to_string(),
            device_secret: device_secret.to_string(),
            backend_host: DEFAULT_BACKEND_HOST.to_string(),
            backend_port: DEFAULT_BACKEND_PORT,
            device_type: DeviceType::Generic,
            poll_interval_idle: Duration::from_millis(DEFAULT_POLL_IDLE_MS),
            poll_interval_active: Duration::from_millis(DEFAULT_POLL_ACTIVE_MS),
        }
    }
}

/// Builder for [`DeviceConfig`].
#[derive(Debug)]
pub struct DeviceConfigBuilder {
    device_id: String,
    device_secret: String,
    backend_host: String,
    backend_port: u16,
    device_type: DeviceType,
    poll_interval_idle: Duration,
    poll_interval_active: Duration,
}

impl DeviceConfigBuilder {
    /// Override the backend host.
    pub fn backend_host(mut self, host: &str) -> Self {
        self.backend_host = host.to_string();
        self
    }

    /// Override the backend port.
    pub fn backend_port(mut self, port: u16) -> Self {
        self.backend_port = port;
        self
    }

    /// Set the device type tag.
    pub fn device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = device_type;
        self
    }

    /// Override the idle poll interval.
    pub fn poll_interval_idle(mut self, interval: Duration) -> Self {
        self.poll_interval_idle = interval;
        self
    }

    /// Override the active poll interval.
    pub fn poll_interval_active(mut self, interval: Duration) -> Self {
        self.poll_interval_active = interval;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    /// Returns `Error::Config` if:
    /// - the device id or secret is empty
    /// - either poll interval is zero
    ///
    /// Idle shorter than active is the usual policy but is deliberately not
    /// enforced.
    pub fn build(self) -> Result<DeviceConfig> {
        if self.device_id.is_empty() {
            return Err(Error::Config("Device id must not be empty".to_string()));
        }
        if self.backend_host.is_empty() {
            return Err(Error::Config("Backend host must not be empty".to_string()));
        }
        if self.poll_interval_idle.is_zero() || self.poll_interval_active.is_zero() {
            return Err(Error::Config(
                "Poll intervals must be positive".to_string(),
            ));
        }

        Ok(DeviceConfig {
            device_id: self.device_id,
            device_secret: DeviceSecret::new(&self.device_secret)?,
            backend_host: self.backend_host,
            backend_port: self.backend_port,
            device_type: self.device_type,
            poll_interval_idle: self.poll_interval_idle,
            poll_interval_active: self.poll_interval_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DeviceType::CoffeeMachine, "Coffee Machine")]
    #[case(DeviceType::BikeLock, "Bike Lock")]
    #[case(DeviceType::DoorLock, "Door Lock")]
    #[case(DeviceType::PowerSwitch, "Power Switch")]
    #[case(DeviceType::EvCharger, "EV Charger")]
    #[case(DeviceType::Generic, "Generic Device")]
    fn test_device_type_labels(#[case] device_type: DeviceType, #[case] expected: &str) {
        assert_eq!(device_type.label(), expected);
        assert!(!device_type.label().is_empty());
    }

    #[rstest]
    #[case(Currency::Tse, "TSE (Solana)")]
    #[case(Currency::Usdc, "USDC (Base)")]
    #[case(Currency::Unknown, "Unknown")]
    fn test_currency_labels(#[case] currency: Currency, #[case] expected: &str) {
        assert_eq!(currency.label(), expected);
    }

    #[rstest]
    #[case("TSE", Currency::Tse)]
    #[case("USDC", Currency::Usdc)]
    #[case("SOL", Currency::Unknown)]
    #[case("", Currency::Unknown)]
    #[case("usdc", Currency::Unknown)]
    fn test_currency_from_code(#[case] code: &str, #[case] expected: Currency) {
        assert_eq!(Currency::from_code(code), expected);
    }

    #[test]
    fn test_session_status_terminal_states() {
        assert!(SessionStatus::Expired.is_terminal());
        assert!(SessionStatus::Ended.is_terminal());
        assert!(!SessionStatus::None.is_terminal());
        assert!(!SessionStatus::PaymentRequired.is_terminal());
        assert!(!SessionStatus::Active.is_terminal());
    }

    #[test]
    fn test_session_status_display() {
        assert_eq!(SessionStatus::PaymentRequired.to_string(), "PaymentRequired");
        assert_eq!(SessionStatus::Active.to_string(), "Active");
    }

    #[test]
    fn test_device_secret_debug_is_redacted() {
        let secret = DeviceSecret::new("super-secret").unwrap();
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("super-secret"));
        assert_eq!(debug, "DeviceSecret(****)");
    }

    #[test]
    fn test_device_secret_rejects_empty() {
        assert!(DeviceSecret::new("").is_err());
    }

    #[test]
    fn test_device_secret_constant_time_eq() {
        let a = DeviceSecret::new("abc").unwrap();
        let b = DeviceSecret::new("abc").unwrap();
        let c = DeviceSecret::new("abd").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = DeviceConfig::builder("dev-1", "secret").build().unwrap();

        assert_eq!(config.backend_host, DEFAULT_BACKEND_HOST);
        assert_eq!(config.backend_port, DEFAULT_BACKEND_PORT);
        assert_eq!(config.device_type, DeviceType::Generic);
        assert_eq!(config.poll_interval_idle, Duration::from_millis(1500));
        assert_eq!(config.poll_interval_active, Duration::from_millis(3000));
    }

    #[test]
    fn test_config_builder_overrides() {
        let config = DeviceConfig::builder("dev-1", "secret")
            .backend_host("localhost")
            .backend_port(8080)
            .device_type(DeviceType::EvCharger)
            .poll_interval_idle(Duration::from_millis(500))
            .poll_interval_active(Duration::from_secs(10))
            .build()
            .unwrap();

        assert_eq!(config.backend_host, "localhost");
        assert_eq!(config.backend_port, 8080);
        assert_eq!(config.device_type, DeviceType::EvCharger);
        assert_eq!(config.poll_interval_idle, Duration::from_millis(500));
        assert_eq!(config.poll_interval_active, Duration::from_secs(10));
    }

    #[test]
    fn test_config_builder_rejects_zero_intervals() {
        let result = DeviceConfig::builder("dev-1", "secret")
            .poll_interval_idle(Duration::ZERO)
            .build();
        assert!(result.is_err());

        let result = DeviceConfig::builder("dev-1", "secret")
            .poll_interval_active(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_builder_rejects_empty_identity() {
        assert!(DeviceConfig::builder("", "secret").build().is_err());
        assert!(DeviceConfig::builder("dev-1", "").build().is_err());
    }

    #[test]
    fn test_config_allows_idle_longer_than_active() {
        // Unusual but legal: the idle < active relation is policy, not an
        // invariant.
        let config = DeviceConfig::builder("dev-1", "secret")
            .poll_interval_idle(Duration::from_secs(30))
            .poll_interval_active(Duration::from_secs(1))
            .build();
        assert!(config.is_ok());
    }
}

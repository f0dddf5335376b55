//! Protocol-level constants for the X.402 device client.
//!
//! These values mirror the defaults baked into shipped device firmware.
//! Everything here can be overridden through [`DeviceConfig`], but the
//! defaults are what the backend fleet is provisioned against.
//!
//! [`DeviceConfig`]: crate::types::DeviceConfig

// ============================================================================
// Backend Defaults
// ============================================================================

/// Default backend host the device polls for session state.
pub const DEFAULT_BACKEND_HOST: &str = "tse-x-backend.onrender.com";

/// Default backend port (HTTPS).
pub const DEFAULT_BACKEND_PORT: u16 = 443;

// ============================================================================
// Polling Cadence
// ============================================================================

/// Default poll interval while no session is active (milliseconds).
///
/// Kept short so a user who just paid sees the device unlock quickly.
pub const DEFAULT_POLL_IDLE_MS: u64 = 1500;

/// Default poll interval while a session is active (milliseconds).
///
/// Longer than the idle interval: once access is granted the device only
/// needs to notice revocation or expiry, so it can go easier on the radio
/// and the battery.
pub const DEFAULT_POLL_ACTIVE_MS: u64 = 3000;

// ============================================================================
// HTTP Status Codes
// ============================================================================

/// Backend response: session state readable from the body.
pub const HTTP_OK: u16 = 200;

/// Backend response: access is gated on a completed payment (X.402).
pub const HTTP_PAYMENT_REQUIRED: u16 = 402;

/// Backend response: device credentials rejected. Transport-level error,
/// never parsed into session state.
pub const HTTP_FORBIDDEN: u16 = 403;

/// Backend response: device unknown to the backend. Transport-level error,
/// never parsed into session state.
pub const HTTP_NOT_FOUND: u16 = 404;

// ============================================================================
// Buffer Limits
// ============================================================================

/// Minimum capacity (bytes) a caller should reserve for [`format_time`]
/// output. `"596523h 14m 7s"` (the u32 ceiling) fits with room to spare.
///
/// [`format_time`]: crate::format::format_time
pub const TIME_BUFFER_MIN: usize = 16;

/// Maximum backend response body accepted for parsing (bytes).
///
/// Session payloads are well under 1 KiB in practice; anything larger is
/// dropped at the transport boundary before the scanner sees it, matching
/// the fixed-buffer discipline of the device firmware this client targets.
pub const MAX_RESPONSE_LENGTH: usize = 4096;

/// Maximum number of state transitions retained for debugging.
///
/// A full payment cycle is 3-4 transitions, so this covers dozens of
/// sessions without unbounded growth on long-running devices.
pub const MAX_TRANSITION_HISTORY: usize = 64;

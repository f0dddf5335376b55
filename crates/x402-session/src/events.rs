//! Callback surface the firmware implements.
//!
//! The state machine invokes these synchronously from the polling call
//! site, never concurrently and never queued. A status change fires at
//! most once per transition; repeated identical poll results do not
//! re-notify.

use x402_core::{Currency, SessionStatus};

/// Firmware-side consumer of session lifecycle notifications.
///
/// Typical implementations drive a relay or lock from
/// [`on_status_changed`](SessionEvents::on_status_changed) and update a
/// display or ledger from
/// [`on_payment_observed`](SessionEvents::on_payment_observed).
pub trait SessionEvents {
    /// The session status changed. `remaining_seconds` is the granted time
    /// for `Active` and 0 for every other status.
    fn on_status_changed(&mut self, status: SessionStatus, remaining_seconds: u32);

    /// A payment funding the session was observed (fires on entry to
    /// `Active` when the response carries a recognized currency). Amount
    /// is 0.0 when the backend omits it.
    fn on_payment_observed(&mut self, currency: Currency, amount: f64) {
        let _ = (currency, amount);
    }
}

/// No-op event sink for headless use and tests that only inspect state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEvents;

impl SessionEvents for NullEvents {
    fn on_status_changed(&mut self, _status: SessionStatus, _remaining_seconds: u32) {}
}

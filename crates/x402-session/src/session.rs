//! The session model: what the device believes right now.
//!
//! A [`Session`] is updated exactly once per successful poll response. The
//! split between "what the wire said" ([`SessionResponse`]) and "what we
//! believe" (this type) means a malformed response can only disturb the
//! fields it legitimately carries; payment references from earlier polls
//! survive.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use x402_core::Currency;
use x402_protocol::SessionResponse;

/// Mutable session state, single instance per device.
///
/// Owned by the session state machine and mutated only from the polling
/// call site. `expires_at` is meaningful only while `access_granted` is
/// true; when it is false, `remaining_seconds` may still carry the last
/// observed value for grace-period display, but the state machine — not
/// this struct — is the source of truth for access control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Last grant verdict absorbed from the backend.
    pub access_granted: bool,

    /// Seconds remaining as last reported by the backend.
    pub remaining_seconds: u32,

    /// Currency that funded the session ([`Currency::Unknown`] until the
    /// backend says otherwise).
    pub currency: Currency,

    /// Paying wallet, empty until observed. Retained across responses that
    /// omit it.
    pub wallet_address: String,

    /// Funding transaction hash, same retention as `wallet_address`.
    pub tx_hash: String,

    /// Local-clock expiry computed when the grant was absorbed.
    ///
    /// Not serialized: `Instant` is process-specific.
    #[serde(skip)]
    pub expires_at: Option<Instant>,
}

impl Session {
    /// Fresh session with nothing observed yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            access_granted: false,
            remaining_seconds: 0,
            currency: Currency::Unknown,
            wallet_address: String::new(),
            tx_hash: String::new(),
            expires_at: None,
        }
    }

    /// Absorb a parsed poll response.
    ///
    /// `expires_at` is recomputed (`now + remainingSeconds`) only when the
    /// response grants access; a non-granting response clears it. Wallet
    /// and transaction fields are overwritten only when the response
    /// actually carries them.
    pub fn apply(&mut self, response: &SessionResponse<'_>, now: Instant) {
        self.access_granted = response.access_granted;
        self.remaining_seconds = response.remaining_seconds;
        self.currency = response.currency;

        self.expires_at = if response.access_granted {
            Some(now + Duration::from_secs(u64::from(response.remaining_seconds)))
        } else {
            None
        };

        if let Some(wallet) = response.wallet_address {
            self.wallet_address = wallet.to_string();
        }
        if let Some(tx) = response.tx_hash {
            self.tx_hash = tx.to_string();
        }
    }

    /// Whether the local clock has passed the expiry of a granted session.
    ///
    /// Always `false` when no expiry is armed.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// Seconds left on the local clock, for display surfaces.
    ///
    /// Falls back to the last backend-reported value when no expiry is
    /// armed (grace-period display).
    #[must_use]
    pub fn remaining_at(&self, now: Instant) -> u32 {
        match self.expires_at {
            Some(expires_at) => expires_at.saturating_duration_since(now).as_secs() as u32,
            None => self.remaining_seconds,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

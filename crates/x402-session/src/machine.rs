//! Session state machine and polling policy.
//!
//! The machine owns the single [`Session`] instance and interprets poll
//! results and clock readings into status transitions:
//!
//! | From | Trigger | To |
//! |------|---------|----|
//! | `None` | poll says `granted=false` / HTTP 402 | `PaymentRequired` |
//! | `None` / `PaymentRequired` | poll says `granted=true` | `Active` |
//! | `Active` | local clock reaches expiry | `Expired` |
//! | `Active` | poll says `granted=false` (backend revocation) | `Ended` |
//! | `Active` / `PaymentRequired` / `Expired` | explicit end request | `Ended` |
//! | `Expired` / `Ended` | poll says `granted=true` | `Active` (re-arm) |
//!
//! Polling cadence follows the status: idle interval while waiting
//! (`None`, `PaymentRequired`, `Expired`, `Ended`), active interval while
//! access is granted. A transport failure never moves the machine; the
//! caller holds the previous status and retries at the idle interval.
//!
//! # Examples
//!
//! ```
//! use x402_core::{DeviceConfig, SessionStatus};
//! use x402_session::{NullEvents, SessionMachine};
//!
//! let config = DeviceConfig::builder("espresso-01", "s3cret").build().unwrap();
//! let mut machine = SessionMachine::new(config);
//! let mut events = NullEvents;
//!
//! assert_eq!(machine.status(), SessionStatus::None);
//!
//! machine
//!     .handle_response(200, r#"{"accessGranted":true,"remainingSeconds":90}"#, &mut events)
//!     .unwrap();
//! assert_eq!(machine.status(), SessionStatus::Active);
//! assert_eq!(machine.session().remaining_seconds, 90);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use x402_core::{
    Currency, DeviceConfig, Error, Result, SessionStatus,
    constants::{HTTP_OK, HTTP_PAYMENT_REQUIRED, MAX_TRANSITION_HISTORY},
};
use x402_protocol::SessionResponse;

use crate::clock::{Clock, SystemClock};
use crate::events::SessionEvents;
use crate::session::Session;

/// A single recorded status transition.
///
/// The `at` instant is process-specific and therefore not serialized; a
/// deserialized record carries the time of deserialization instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    /// Status transitioned from.
    pub from: SessionStatus,

    /// Status transitioned to.
    pub to: SessionStatus,

    /// When the transition occurred on the local monotonic clock.
    #[serde(skip, default = "Instant::now")]
    pub at: Instant,
}

/// The session state machine.
///
/// Exactly one instance exists per device, explicitly constructed and owned
/// by the firmware main loop; the polling routine borrows it mutably. Not
/// thread-safe by design — the protocol is single-threaded cooperative.
pub struct SessionMachine<C: Clock = SystemClock> {
    config: DeviceConfig,
    clock: C,
    status: SessionStatus,
    session: Session,
    history: VecDeque<StateTransition>,
}

impl SessionMachine<SystemClock> {
    /// Create a machine on the system clock, starting in
    /// [`SessionStatus::None`].
    #[must_use]
    pub fn new(config: DeviceConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> SessionMachine<C> {
    /// Create a machine with an injected clock (tests use [`MockClock`]).
    ///
    /// [`MockClock`]: crate::clock::MockClock
    #[must_use]
    pub fn with_clock(config: DeviceConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            status: SessionStatus::None,
            session: Session::new(),
            history: VecDeque::with_capacity(MAX_TRANSITION_HISTORY),
        }
    }

    /// Current session status.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The session model (read-only; only poll results mutate it).
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The device configuration this machine was built with.
    #[must_use]
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Recorded transitions, oldest first, capped at
    /// [`MAX_TRANSITION_HISTORY`].
    #[must_use]
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.history
    }

    /// How long to wait before the next poll, per the cadence policy.
    #[must_use]
    pub fn next_poll_interval(&self) -> Duration {
        if self.status.is_active() {
            self.config.poll_interval_active
        } else {
            self.config.poll_interval_idle
        }
    }

    /// Retry interval after a transport failure: always the idle cadence,
    /// regardless of status.
    #[must_use]
    pub fn retry_interval(&self) -> Duration {
        self.config.poll_interval_idle
    }

    /// Interpret a completed poll.
    ///
    /// HTTP 200 bodies are parsed for the grant verdict; HTTP 402 is
    /// payment-required regardless of body (the body may still carry a
    /// price hint, which is absorbed into the model). Any other status is
    /// a collaborator-level error: the machine holds its previous state
    /// and the caller retries at [`retry_interval`](Self::retry_interval).
    ///
    /// Returns the transition performed, if any. Re-polling an identical
    /// verdict never re-fires the status callback.
    ///
    /// # Errors
    /// Returns `Error::UnexpectedHttpStatus` for anything other than
    /// 200/402.
    pub fn handle_response<E: SessionEvents>(
        &mut self,
        status_code: u16,
        body: &str,
        events: &mut E,
    ) -> Result<Option<StateTransition>> {
        if status_code != HTTP_OK && status_code != HTTP_PAYMENT_REQUIRED {
            warn!(status_code, "holding session state on unexpected HTTP status");
            return Err(Error::UnexpectedHttpStatus {
                status: status_code,
            });
        }

        let mut response = SessionResponse::parse(body);
        if status_code == HTTP_PAYMENT_REQUIRED {
            // 402 is authoritative: whatever the body claims, access is not
            // granted until payment clears.
            response.access_granted = false;
        }

        let now = self.clock.now();
        self.session.apply(&response, now);

        if response.access_granted {
            Ok(self.absorb_grant(&response, events))
        } else {
            Ok(self.absorb_denial(events))
        }
    }

    /// Evaluate clock-driven transitions.
    ///
    /// Call from the periodic service routine; while `Active`, the first
    /// tick at or past the session expiry moves to `Expired` and fires
    /// exactly one callback.
    pub fn tick<E: SessionEvents>(&mut self, events: &mut E) -> Option<StateTransition> {
        if self.status.is_active() && self.session.is_expired(self.clock.now()) {
            self.session.access_granted = false;
            self.session.remaining_seconds = 0;
            return Some(self.transition(SessionStatus::Expired, 0, events));
        }
        None
    }

    /// Explicit end request from the user or the app.
    ///
    /// Freezes the session model at its last known values and moves to
    /// `Ended` from any established status. A no-op in `None` (there is
    /// nothing to end) and in `Ended` (already there).
    pub fn end_session<E: SessionEvents>(&mut self, events: &mut E) -> Option<StateTransition> {
        match self.status {
            SessionStatus::None | SessionStatus::Ended => None,
            _ => {
                self.session.access_granted = false;
                Some(self.transition(SessionStatus::Ended, 0, events))
            }
        }
    }

    /// A granting response: refresh the model and (re-)arm `Active`.
    fn absorb_grant<E: SessionEvents>(
        &mut self,
        response: &SessionResponse<'_>,
        events: &mut E,
    ) -> Option<StateTransition> {
        if self.status.is_active() {
            // Model already refreshed by the caller; identical verdict, no
            // duplicate notification.
            return None;
        }

        let transition =
            self.transition(SessionStatus::Active, response.remaining_seconds, events);
        if response.currency != Currency::Unknown {
            events.on_payment_observed(response.currency, response.amount);
        }
        Some(transition)
    }

    /// A non-granting response (402 or `granted=false`).
    fn absorb_denial<E: SessionEvents>(&mut self, events: &mut E) -> Option<StateTransition> {
        match self.status {
            SessionStatus::None => {
                Some(self.transition(SessionStatus::PaymentRequired, 0, events))
            }
            // Backend revocation of a running session.
            SessionStatus::Active => Some(self.transition(SessionStatus::Ended, 0, events)),
            // Still waiting / still terminal: nothing new to report.
            SessionStatus::PaymentRequired | SessionStatus::Expired | SessionStatus::Ended => None,
        }
    }

    /// Perform a transition: record it, log it, notify once.
    fn transition<E: SessionEvents>(
        &mut self,
        to: SessionStatus,
        remaining_seconds: u32,
        events: &mut E,
    ) -> StateTransition {
        let transition = StateTransition {
            from: self.status,
            to,
            at: self.clock.now(),
        };
        debug!(from = %transition.from, to = %transition.to, "session status changed");

        self.status = to;
        self.history.push_back(transition.clone());
        if self.history.len() > MAX_TRANSITION_HISTORY {
            self.history.pop_front();
        }

        events.on_status_changed(to, remaining_seconds);
        transition
    }
}

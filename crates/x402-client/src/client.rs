//! The polling loop: transport in, session transitions out.
//!
//! # Architecture
//!
//! ```text
//! firmware main loop
//!     │
//!     ├─> PollClient::run / poll_once
//!     │       │
//!     │       ├─> PollTransport ───(HTTPS)───> backend
//!     │       │
//!     │       └─> SessionMachine ──> SessionEvents (relay, lock, display)
//! ```
//!
//! The loop never advances session state on a failed poll: the machine
//! holds its previous status and the next attempt is scheduled at the idle
//! interval. Clock-driven expiry is evaluated on every pass, so a session
//! still expires while the backend is unreachable.

use std::time::Duration;

use tracing::{info, warn};
use x402_core::{SessionStatus, constants::MAX_RESPONSE_LENGTH};
use x402_session::{Clock, SessionEvents, SessionMachine, SystemClock};

use crate::traits::PollTransport;

/// Polling loop driver owning the transport and the state machine.
///
/// Single-tasked by design: one device, one client, one loop. In async
/// contexts keep it on a single task; nothing here is `Sync`.
///
/// # Examples
///
/// ```
/// use x402_client::{MockTransport, PollClient};
/// use x402_core::{DeviceConfig, SessionStatus};
/// use x402_session::NullEvents;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> x402_core::Result<()> {
/// let config = DeviceConfig::builder("dev-1", "secret").build()?;
/// let (transport, handle) = MockTransport::new();
/// handle.push_response(200, r#"{"accessGranted":true,"remainingSeconds":60}"#);
///
/// let mut client = PollClient::new(config, transport);
/// let mut events = NullEvents;
///
/// client.poll_once(&mut events).await;
/// assert_eq!(client.machine().status(), SessionStatus::Active);
/// # Ok(())
/// # }
/// ```
pub struct PollClient<T: PollTransport, C: Clock = SystemClock> {
    transport: T,
    machine: SessionMachine<C>,
}

impl<T: PollTransport> PollClient<T, SystemClock> {
    /// Create a client on the system clock.
    #[must_use]
    pub fn new(config: x402_core::DeviceConfig, transport: T) -> Self {
        Self {
            transport,
            machine: SessionMachine::new(config),
        }
    }
}

impl<T: PollTransport, C: Clock> PollClient<T, C> {
    /// Create a client around an existing machine (injected clock).
    #[must_use]
    pub fn with_machine(transport: T, machine: SessionMachine<C>) -> Self {
        Self { transport, machine }
    }

    /// The state machine, for status/session inspection.
    #[must_use]
    pub fn machine(&self) -> &SessionMachine<C> {
        &self.machine
    }

    /// Explicitly end the session (user/app request). Stops a running
    /// [`run`](Self::run) loop at its next check.
    pub fn end_session<E: SessionEvents>(&mut self, events: &mut E) {
        self.machine.end_session(events);
    }

    /// One pass of the service routine: poll, feed the machine, evaluate
    /// expiry.
    ///
    /// Returns the delay to wait before the next poll — the machine's
    /// cadence after a usable response, the idle retry interval after a
    /// transport failure or rejected response. Failures never advance
    /// session state.
    pub async fn poll_once<E: SessionEvents>(&mut self, events: &mut E) -> Duration {
        let delay = match self.transport.poll(self.machine.config()).await {
            Ok(response) if response.body.len() > MAX_RESPONSE_LENGTH => {
                warn!(
                    actual = response.body.len(),
                    limit = MAX_RESPONSE_LENGTH,
                    "discarding oversized poll response"
                );
                self.machine.retry_interval()
            }
            Ok(response) => {
                match self
                    .machine
                    .handle_response(response.status_code, &response.body, events)
                {
                    Ok(_) => self.machine.next_poll_interval(),
                    Err(error) => {
                        warn!(%error, "poll response rejected; holding session state");
                        self.machine.retry_interval()
                    }
                }
            }
            Err(error) => {
                warn!(%error, "poll transport failure; holding session state");
                self.machine.retry_interval()
            }
        };

        self.machine.tick(events);
        delay
    }

    /// Run the polling loop until the session is explicitly ended (by the
    /// app or by backend revocation). Ending the session stops all further
    /// network activity, per the protocol's cancellation semantics.
    pub async fn run<E: SessionEvents>(&mut self, events: &mut E) {
        info!(
            device_id = %self.machine.config().device_id,
            device_type = %self.machine.config().device_type,
            "starting poll loop"
        );

        loop {
            let delay = self.poll_once(events).await;
            if self.machine.status() == SessionStatus::Ended {
                info!("session ended; stopping poll loop");
                return;
            }
            tokio::time::sleep(delay).await;
        }
    }
}

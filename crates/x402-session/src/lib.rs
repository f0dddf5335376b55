//! Session lifecycle for the X.402 pay-for-access protocol.
//!
//! This crate turns parsed backend responses and clock readings into a
//! well-defined client session state machine:
//!
//! - [`Session`] — what the device currently believes about the access
//!   grant (time remaining, currency, payment references).
//! - [`SessionMachine`] — the status transitions (`None`,
//!   `PaymentRequired`, `Active`, `Expired`, `Ended`), the polling cadence
//!   policy, and at-most-once change notifications.
//! - [`SessionEvents`] — the callback surface firmware implements to drive
//!   relays, locks and displays.
//! - [`Clock`] — injected time source so expiry logic is testable without
//!   real hardware delay.
//!
//! Everything here is synchronous and single-threaded by design: the
//! firmware invokes the update path from its periodic service routine, and
//! exactly one mutable [`Session`] exists, owned by the machine.

pub mod clock;
pub mod events;
pub mod machine;
pub mod session;

pub use clock::{Clock, MockClock, SystemClock};
pub use events::{NullEvents, SessionEvents};
pub use machine::{SessionMachine, StateTransition};
pub use session::Session;

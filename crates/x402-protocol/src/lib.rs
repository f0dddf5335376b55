//! Backend response parsing for the X.402 pay-for-access protocol.
//!
//! The backend answers polls with small JSON objects. On the controllers
//! this client targets there is no room for a DOM-building JSON parser, so
//! this crate extracts the handful of fields the session protocol needs by
//! scanning the raw text: key lookup plus typed value extraction, read-only,
//! no allocation.
//!
//! Absence and malformation never fail; they degrade to documented defaults
//! (`false` / `0` / [`Currency::Unknown`]). Callers must treat those
//! defaults as "unknown", not as authoritative zero/false values.
//!
//! The scanner is deliberately a narrow seam: firmware for less constrained
//! targets can swap in a real JSON parser without touching the session
//! state machine.
//!
//! [`Currency::Unknown`]: x402_core::Currency::Unknown

pub mod response;
pub mod scan;

pub use response::{
    SessionResponse, parse_access_granted, parse_currency, parse_remaining_seconds,
};
pub use scan::JsonScanner;

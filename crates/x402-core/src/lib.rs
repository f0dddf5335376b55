//! Core building blocks for the X.402 pay-for-access device client.
//!
//! This crate holds the domain vocabulary (device types, currencies, session
//! status), the device configuration surface, the shared error type and the
//! display-surface formatting helpers. It contains no I/O and no protocol
//! logic; those live in the `x402-protocol` and `x402-session` crates.

pub mod constants;
pub mod error;
pub mod format;
pub mod types;

pub use error::{Error, Result};
pub use format::{format_time, format_time_string};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

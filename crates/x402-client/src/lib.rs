//! Transport layer and polling loop for the X.402 device client.
//!
//! The session core (`x402-session`) is transport-agnostic: it consumes
//! `(status_code, body)` pairs and clock readings. This crate supplies the
//! other half:
//!
//! - [`PollTransport`] — the narrow async seam the firmware's radio stack
//!   implements (one poll in, one response out).
//! - [`HttpTransport`] — the reference implementation over HTTPS.
//! - [`MockTransport`] — a scriptable transport for tests and emulation.
//! - [`PollClient`] — the polling loop: transport → state machine → tick,
//!   sleeping the cadence the machine dictates between polls.
//!
//! # Design Principles
//!
//! The transport is deliberately dumb:
//! - **No automatic retry**: the polling policy owns retry timing.
//! - **No connection pooling logic**: one device, one backend.
//! - **Simple error handling**: a failed poll is reported and the session
//!   state is left exactly as it was.

#![allow(async_fn_in_trait)]

pub mod client;
pub mod http;
pub mod mock;
pub mod traits;

pub use client::PollClient;
pub use http::HttpTransport;
pub use mock::{MockTransport, MockTransportHandle};
pub use traits::{PollResponse, PollTransport};

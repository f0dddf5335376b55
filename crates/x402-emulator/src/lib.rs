//! Virtual device front panel for the X.402 client.
//!
//! This crate lets integrators exercise the full payment lifecycle without
//! hardware: a 16x2 character LCD model ([`VirtualLcd`]), an emulated
//! device wired to the session event stream ([`DeviceEmulator`]), and the
//! `x402-demo` binary that walks a scripted payment cycle end to end.

pub mod device;
pub mod display;

pub use device::DeviceEmulator;
pub use display::{Alignment, VirtualLcd, VirtualLcdBuilder, align_text, truncate_text};

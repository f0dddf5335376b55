//! Human-readable duration rendering for display surfaces.
//!
//! The target devices drive small character LCDs and serial consoles, so the
//! output is deliberately compact: `"1h 2m 5s"`, `"2m 5s"`, `"45s"`. The
//! coarsest non-zero unit starts the chain and the seconds component is
//! always present, even when zero.

use std::fmt::Write;

use crate::constants::TIME_BUFFER_MIN;

/// Format a duration in seconds into a caller-supplied buffer.
///
/// The buffer is cleared first and reused, so a device loop can render into
/// the same allocation forever. Reserve at least [`TIME_BUFFER_MIN`] bytes
/// up front to keep the hot path allocation-free.
///
/// # Examples
///
/// ```
/// use x402_core::format_time;
///
/// let mut buf = String::with_capacity(16);
/// assert_eq!(format_time(45, &mut buf), "45s");
/// assert_eq!(format_time(125, &mut buf), "2m 5s");
/// assert_eq!(format_time(3725, &mut buf), "1h 2m 5s");
/// assert_eq!(format_time(0, &mut buf), "0s");
/// ```
pub fn format_time(total_seconds: u64, buffer: &mut String) -> &str {
    buffer.clear();
    buffer.reserve(TIME_BUFFER_MIN);

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    // write! to a String cannot fail
    let _ = if hours > 0 {
        write!(buffer, "{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        write!(buffer, "{}m {}s", minutes, secs)
    } else {
        write!(buffer, "{}s", secs)
    };

    buffer.as_str()
}

/// Convenience wrapper allocating a fresh `String`.
///
/// Prefer [`format_time`] in loops that render every tick.
#[must_use]
pub fn format_time_string(total_seconds: u64) -> String {
    let mut buffer = String::with_capacity(TIME_BUFFER_MIN);
    format_time(total_seconds, &mut buffer);
    buffer
}

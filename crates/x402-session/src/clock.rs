//! Injectable monotonic time source.
//!
//! On hardware the equivalent of `millis()` is ambient; here the clock is a
//! capability passed into the session machine so that expiry logic can be
//! tested by advancing time instead of sleeping.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source for expiry decisions.
pub trait Clock {
    /// Current monotonic time.
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for tests.
///
/// Clones share the same underlying time, so a test can hold one clone and
/// hand another to the machine under test.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use x402_session::{Clock, MockClock};
///
/// let clock = MockClock::new();
/// let start = clock.now();
///
/// clock.advance(Duration::from_secs(10));
/// assert_eq!(clock.now() - start, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct MockClock {
    base: Instant,
    offset_ms: Arc<AtomicU64>,
}

impl MockClock {
    /// Create a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Advance the clock by `duration` (sub-millisecond precision is
    /// truncated).
    pub fn advance(&self, duration: Duration) {
        self.offset_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

//! Emulated device front end.
//!
//! [`DeviceEmulator`] stands in for the physical machine: it consumes
//! session events, drives the virtual LCD and a simulated output relay
//! (brewer, lock coil, charge contactor), and logs what a technician
//! would see on the bench.

use std::time::Duration;

use chrono::Local;
use tracing::info;
use x402_core::{Currency, DeviceType, SessionStatus};
use x402_session::SessionEvents;

use crate::display::VirtualLcd;

/// How long a payment confirmation stays on the panel.
const PAYMENT_FLASH: Duration = Duration::from_secs(3);

/// Virtual device wired to the session event stream.
///
/// # Examples
///
/// ```
/// use x402_core::{DeviceType, SessionStatus};
/// use x402_emulator::DeviceEmulator;
/// use x402_session::SessionEvents;
///
/// let mut device = DeviceEmulator::new(DeviceType::CoffeeMachine);
/// assert!(!device.output_enabled());
///
/// device.on_status_changed(SessionStatus::Active, 300);
/// assert!(device.output_enabled());
/// assert_eq!(device.display().line(1).unwrap().trim(), "5m 0s left");
/// ```
#[derive(Debug)]
pub struct DeviceEmulator {
    device_type: DeviceType,
    display: VirtualLcd,
    /// Simulated relay state. On only while the session is active.
    output_enabled: bool,
    /// Last session state seen, so the panel can be restored after a flash
    /// message expires.
    last_seen: (SessionStatus, u32),
}

impl DeviceEmulator {
    /// Create an emulated device with the standard 16x2 panel.
    #[must_use]
    pub fn new(device_type: DeviceType) -> Self {
        Self {
            device_type,
            display: VirtualLcd::builder().build(),
            output_enabled: false,
            last_seen: (SessionStatus::None, 0),
        }
    }

    /// The panel, for rendering or assertions.
    #[must_use]
    pub fn display(&self) -> &VirtualLcd {
        &self.display
    }

    /// `true` while the simulated relay is energized.
    #[must_use]
    pub fn output_enabled(&self) -> bool {
        self.output_enabled
    }

    /// Expire pending panel flashes, restoring the session view when one
    /// clears. Call from the device loop.
    pub fn service_display(&mut self) {
        if self.display.update() {
            let (status, remaining) = self.last_seen;
            self.display.update_from_session(status, remaining);
        }
    }

    /// Panel contents framed the way a bench console prints them.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("+----------------+\n");
        for line in self.display.all_lines() {
            out.push('|');
            out.push_str(line);
            out.push_str("|\n");
        }
        out.push_str("+----------------+");
        out
    }
}

impl SessionEvents for DeviceEmulator {
    fn on_status_changed(&mut self, status: SessionStatus, remaining_seconds: u32) {
        self.output_enabled = status.is_active();
        self.last_seen = (status, remaining_seconds);
        self.display.update_from_session(status, remaining_seconds);

        if status.is_active() {
            let until = Local::now() + chrono::Duration::seconds(i64::from(remaining_seconds));
            info!(
                device = %self.device_type,
                remaining_seconds,
                until = %until.format("%H:%M:%S"),
                "output enabled"
            );
        } else {
            info!(device = %self.device_type, %status, "output disabled");
        }
    }

    fn on_payment_observed(&mut self, currency: Currency, amount: f64) {
        info!(device = %self.device_type, %currency, amount, "payment observed");

        let message = if amount > 0.0 {
            format!("PAID {} {}", amount, currency.code())
        } else {
            format!("PAID {}", currency.code())
        };
        // Panel always has line 0; flash only fails on a zero duration.
        let _ = self.display.flash(&message, PAYMENT_FLASH);
    }
}

//! Virtual 16x2 character LCD for device emulation.
//!
//! Models the front panel most target devices carry: two lines of sixteen
//! ASCII characters. The display renders the session lifecycle (payment
//! prompt, countdown, expiry) and supports short-lived flash messages such
//! as a payment confirmation.
//!
//! # Character Encoding
//!
//! The display accepts ASCII only (0x20-0x7E). HD44780-class panels do not
//! render Unicode, and the emulator deliberately enforces the same
//! constraint so integrations fail here instead of on hardware.
//!
//! # Examples
//!
//! ```
//! use x402_core::SessionStatus;
//! use x402_emulator::VirtualLcd;
//!
//! let mut lcd = VirtualLcd::new(2, 16, "PAY TO START".to_string());
//! lcd.update_from_session(SessionStatus::Active, 125);
//!
//! assert_eq!(lcd.line(0).unwrap().trim(), "ACTIVE");
//! assert_eq!(lcd.line(1).unwrap().trim(), "2m 5s left");
//! ```

use std::time::{Duration, Instant};

use x402_core::{Error, Result, SessionStatus, format_time};

/// Standard panel height for the target fleet.
const DEFAULT_LINES: usize = 2;

/// Standard panel width for the target fleet.
const DEFAULT_COLUMNS: usize = 16;

/// Horizontal placement of text within a display line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Text starts at column 0, space-padded on the right.
    Left,
    /// Text centered, extra space on the right when padding is odd.
    Center,
    /// Text ends at the last column, space-padded on the left.
    Right,
}

/// Virtual character LCD.
///
/// Not thread-safe by design; in async contexts keep it on one task or wrap
/// it in `tokio::sync::Mutex`.
///
/// # Examples
///
/// ```
/// use x402_emulator::VirtualLcd;
///
/// let mut lcd = VirtualLcd::new(2, 16, "PAY TO START".to_string());
/// lcd.set_line(0, "HELLO").unwrap();
///
/// assert_eq!(lcd.line(0).unwrap(), "HELLO           ");
/// ```
#[derive(Debug, Clone)]
pub struct VirtualLcd {
    lines: usize,
    columns: usize,
    buffer: Vec<String>,
    default_message: String,
    /// Flash message with its expiration timestamp.
    flash: Option<(String, Instant)>,
    /// Reused render buffer for countdown text.
    time_buf: String,
}

impl VirtualLcd {
    /// Create a display with the given dimensions and idle message.
    ///
    /// The idle message is shown centered on the first line.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `default_message` contains non-ASCII
    /// characters.
    pub fn new(lines: usize, columns: usize, default_message: String) -> Self {
        debug_assert!(
            default_message.is_ascii(),
            "Display text must be ASCII only. Got: '{}'",
            default_message
        );

        let mut buffer = vec![" ".repeat(columns); lines];
        if !default_message.is_empty() {
            buffer[0] = align_text(&default_message, columns, Alignment::Center);
        }

        Self {
            lines,
            columns,
            buffer,
            default_message,
            flash: None,
            time_buf: String::with_capacity(x402_core::constants::TIME_BUFFER_MIN),
        }
    }

    /// Builder with the fleet-standard 16x2 geometry.
    ///
    /// # Examples
    ///
    /// ```
    /// use x402_emulator::VirtualLcd;
    ///
    /// let lcd = VirtualLcd::builder()
    ///     .default_message("WELCOME".to_string())
    ///     .build();
    ///
    /// assert_eq!(lcd.line(0).unwrap().trim(), "WELCOME");
    /// ```
    pub fn builder() -> VirtualLcdBuilder {
        VirtualLcdBuilder::default()
    }

    /// Set a line, left-aligned.
    ///
    /// Control characters are stripped and text is truncated to the panel
    /// width.
    ///
    /// # Errors
    /// Returns `Error::InvalidLine` if the line index is out of bounds.
    pub fn set_line(&mut self, line: usize, text: &str) -> Result<()> {
        self.set_line_aligned(line, text, Alignment::Left)
    }

    /// Set a line with explicit alignment.
    ///
    /// # Errors
    /// Returns `Error::InvalidLine` if the line index is out of bounds.
    pub fn set_line_aligned(&mut self, line: usize, text: &str, align: Alignment) -> Result<()> {
        debug_assert!(
            text.is_ascii(),
            "Display text must be ASCII only. Got: '{}'",
            text
        );

        if line >= self.lines {
            return Err(Error::InvalidLine {
                line,
                max: self.lines - 1,
            });
        }

        let sanitized = sanitize_text(text);
        self.buffer[line] = align_text(&sanitized, self.columns, align);
        Ok(())
    }

    /// Set both lines at once, left-aligned.
    ///
    /// # Errors
    /// Returns `Error::InvalidLine` if the panel has fewer than two lines.
    pub fn set_lines(&mut self, line1: &str, line2: &str) -> Result<()> {
        self.set_line(0, line1)?;
        self.set_line(1, line2)?;
        Ok(())
    }

    /// Show a centered flash message that auto-clears after `duration`.
    ///
    /// The next [`update`](Self::update) call past the deadline restores
    /// the idle message.
    ///
    /// # Errors
    /// Returns `Error::Config` if the duration is zero.
    pub fn flash(&mut self, text: &str, duration: Duration) -> Result<()> {
        if duration.is_zero() {
            return Err(Error::Config(
                "Flash message duration must be positive".to_string(),
            ));
        }

        let sanitized = sanitize_text(text);
        self.flash = Some((sanitized.clone(), Instant::now() + duration));
        self.set_line_aligned(0, &sanitized, Alignment::Center)?;
        self.set_line(1, "")?;
        Ok(())
    }

    /// Expire a pending flash message if its deadline passed.
    ///
    /// Call periodically from the device loop. Returns `true` if the
    /// display content changed.
    pub fn update(&mut self) -> bool {
        if let Some((_, expiration)) = self.flash
            && Instant::now() >= expiration
        {
            self.flash = None;
            self.reset_to_default();
            return true;
        }
        false
    }

    /// Blank every line. Does not restore the idle message.
    pub fn clear(&mut self) {
        for line in &mut self.buffer {
            *line = " ".repeat(self.columns);
        }
        self.flash = None;
    }

    /// Restore the idle message, clearing any flash.
    pub fn reset_to_default(&mut self) {
        self.clear();
        if !self.default_message.is_empty() {
            self.buffer[0] = align_text(&self.default_message, self.columns, Alignment::Center);
        }
    }

    /// Render the current session state onto the panel.
    ///
    /// | Status            | Line 0            | Line 1          |
    /// |-------------------|-------------------|-----------------|
    /// | `None`            | idle message      | (blank)         |
    /// | `PaymentRequired` | `PAYMENT REQUIRED`| `SCAN TO PAY`   |
    /// | `Active`          | `ACTIVE`          | `2m 5s left`    |
    /// | `Expired`         | `SESSION EXPIRED` | `PAY TO RESUME` |
    /// | `Ended`           | `SESSION ENDED`   | (blank)         |
    pub fn update_from_session(&mut self, status: SessionStatus, remaining_seconds: u32) {
        // A session transition overrides any pending flash.
        self.flash = None;

        let (line1, line2) = match status {
            SessionStatus::None => (self.default_message.clone(), String::new()),
            SessionStatus::PaymentRequired => ("PAYMENT REQUIRED".into(), "SCAN TO PAY".into()),
            SessionStatus::Active => {
                let remaining = format_time(u64::from(remaining_seconds), &mut self.time_buf);
                ("ACTIVE".into(), format!("{} left", remaining))
            }
            SessionStatus::Expired => ("SESSION EXPIRED".into(), "PAY TO RESUME".into()),
            SessionStatus::Ended => ("SESSION ENDED".into(), String::new()),
        };

        // Line indexes are in range by construction.
        let _ = self.set_line_aligned(0, &line1, Alignment::Center);
        let _ = self.set_line_aligned(1, &line2, Alignment::Center);
    }

    /// One line of the panel, padded to the panel width.
    ///
    /// # Errors
    /// Returns `Error::InvalidLine` if the line index is out of bounds.
    pub fn line(&self, line: usize) -> Result<&str> {
        if line >= self.lines {
            return Err(Error::InvalidLine {
                line,
                max: self.lines - 1,
            });
        }
        Ok(&self.buffer[line])
    }

    /// All lines, top to bottom.
    pub fn all_lines(&self) -> Vec<&str> {
        self.buffer.iter().map(|s| s.as_str()).collect()
    }

    /// `true` when the panel shows the idle message and no flash is pending.
    pub fn is_default(&self) -> bool {
        self.flash.is_none() && self.buffer[0].trim() == self.default_message
    }
}

/// Builder for [`VirtualLcd`].
#[derive(Debug)]
pub struct VirtualLcdBuilder {
    lines: usize,
    columns: usize,
    default_message: String,
}

impl VirtualLcdBuilder {
    /// Override the panel geometry.
    pub fn size(mut self, lines: usize, columns: usize) -> Self {
        self.lines = lines;
        self.columns = columns;
        self
    }

    /// Override the idle message.
    pub fn default_message(mut self, message: String) -> Self {
        self.default_message = message;
        self
    }

    pub fn build(self) -> VirtualLcd {
        VirtualLcd::new(self.lines, self.columns, self.default_message)
    }
}

impl Default for VirtualLcdBuilder {
    fn default() -> Self {
        Self {
            lines: DEFAULT_LINES,
            columns: DEFAULT_COLUMNS,
            default_message: "PAY TO START".to_string(),
        }
    }
}

/// Truncate ASCII text to at most `max_chars` characters.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Pad/align ASCII text to exactly `width` characters.
///
/// # Examples
///
/// ```
/// use x402_emulator::{Alignment, align_text};
///
/// assert_eq!(align_text("HELLO", 10, Alignment::Left), "HELLO     ");
/// assert_eq!(align_text("HELLO", 10, Alignment::Center), "  HELLO   ");
/// assert_eq!(align_text("HELLO", 10, Alignment::Right), "     HELLO");
/// ```
pub fn align_text(text: &str, width: usize, alignment: Alignment) -> String {
    let char_count = text.chars().count();
    if char_count >= width {
        return truncate_text(text, width);
    }

    let padding = width - char_count;
    match alignment {
        Alignment::Left => format!("{}{}", text, " ".repeat(padding)),
        Alignment::Right => format!("{}{}", " ".repeat(padding), text),
        Alignment::Center => {
            let left_pad = padding / 2;
            let right_pad = padding - left_pad;
            format!("{}{}{}", " ".repeat(left_pad), text, " ".repeat(right_pad))
        }
    }
}

/// Strip control characters and surrounding whitespace.
fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
}

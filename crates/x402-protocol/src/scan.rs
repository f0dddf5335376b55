//! Targeted JSON field scanner.
//!
//! [`JsonScanner`] locates a quoted key followed by a colon and extracts the
//! value that follows, without building a parse tree and without allocating.
//! Whitespace around the colon is tolerated; everything else about the
//! matching is byte-level and best-effort.
//!
//! # Accepted approximations
//!
//! - A key/value pattern embedded inside an unrelated string value will
//!   match ("false positive by design"). Backend payloads are flat objects
//!   under the device's control, so this trade is acceptable for the memory
//!   budget it buys.
//! - String extraction does not process escape sequences; the value is cut
//!   at the next `"` byte.
//! - Integer extraction reads leading digits and stops at the first
//!   non-digit.
//!
//! # Examples
//!
//! ```
//! use x402_protocol::JsonScanner;
//!
//! let scanner = JsonScanner::new(r#"{"accessGranted": true, "remainingSeconds":90}"#);
//!
//! assert_eq!(scanner.bool_value("accessGranted"), Some(true));
//! assert_eq!(scanner.u32_value("remainingSeconds"), Some(90));
//! assert_eq!(scanner.str_value("currency"), None);
//! ```

/// Read-only scanner over a raw response body.
///
/// Construction is free; every lookup is a fresh scan from the start of the
/// buffer. Bodies are capped well below the point where repeated scans
/// would matter (see `MAX_RESPONSE_LENGTH` in `x402-core`).
#[derive(Debug, Clone, Copy)]
pub struct JsonScanner<'a> {
    raw: &'a str,
}

impl<'a> JsonScanner<'a> {
    /// Wrap a raw text buffer believed to contain a JSON object.
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The underlying buffer.
    #[must_use]
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Byte offset of the first value belonging to `key`, i.e. the position
    /// right after `"key"`, the colon and any surrounding whitespace.
    ///
    /// Returns `None` if no `"key":` pattern exists in the buffer.
    fn value_start(&self, key: &str) -> Option<usize> {
        let raw = self.raw.as_bytes();
        let key = key.as_bytes();
        if key.is_empty() {
            return None;
        }

        let mut i = 0;
        // Need room for the opening quote, the key and the closing quote.
        while i + key.len() + 1 < raw.len() {
            if raw[i] == b'"'
                && raw[i + 1..i + 1 + key.len()] == *key
                && raw[i + 1 + key.len()] == b'"'
            {
                let mut j = i + key.len() + 2;
                while j < raw.len() && raw[j].is_ascii_whitespace() {
                    j += 1;
                }
                if j < raw.len() && raw[j] == b':' {
                    j += 1;
                    while j < raw.len() && raw[j].is_ascii_whitespace() {
                        j += 1;
                    }
                    return Some(j);
                }
                // Quoted occurrence without a colon (e.g. the key text inside
                // a string value): keep scanning.
            }
            i += 1;
        }
        None
    }

    /// Extract a boolean value.
    ///
    /// Returns `Some(true)`/`Some(false)` only for the literals `true` and
    /// `false`; any other value (or a missing key) is `None`.
    #[must_use]
    pub fn bool_value(&self, key: &str) -> Option<bool> {
        let start = self.value_start(key)?;
        let rest = self.raw.get(start..)?;
        if rest.starts_with("true") {
            Some(true)
        } else if rest.starts_with("false") {
            Some(false)
        } else {
            None
        }
    }

    /// Extract an unsigned integer: leading digits, stopping at the first
    /// non-digit, saturating at `u32::MAX`.
    ///
    /// Returns `None` if the key is absent or the value does not start with
    /// a digit.
    #[must_use]
    pub fn u32_value(&self, key: &str) -> Option<u32> {
        let start = self.value_start(key)?;
        let raw = self.raw.as_bytes();

        let mut value: u32 = 0;
        let mut digits = 0usize;
        for &b in raw.get(start..)?.iter() {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .saturating_mul(10)
                .saturating_add(u32::from(b - b'0'));
            digits += 1;
        }

        if digits == 0 { None } else { Some(value) }
    }

    /// Extract a non-negative decimal number: digits with at most one `.`,
    /// stopping at the first byte that fits neither.
    ///
    /// Returns `None` if the key is absent or nothing numeric follows it.
    #[must_use]
    pub fn f64_value(&self, key: &str) -> Option<f64> {
        let start = self.value_start(key)?;
        let raw = self.raw.as_bytes();

        let mut end = start;
        let mut seen_dot = false;
        while end < raw.len() {
            match raw[end] {
                b'0'..=b'9' => end += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    end += 1;
                }
                _ => break,
            }
        }

        // Digit and dot bytes are ASCII, so the slice boundaries are sound.
        let literal = self.raw.get(start..end)?;
        if literal.is_empty() || literal == "." {
            return None;
        }
        literal.parse().ok()
    }

    /// Extract a string value as a borrowed slice.
    ///
    /// The value must start with `"`; it is cut at the next `"` byte with no
    /// escape handling. Returns `None` for missing keys and non-string
    /// values.
    #[must_use]
    pub fn str_value(&self, key: &str) -> Option<&'a str> {
        let start = self.value_start(key)?;
        let raw = self.raw.as_bytes();

        if *raw.get(start)? != b'"' {
            return None;
        }
        let inner = start + 1;
        let len = self.raw.get(inner..)?.find('"')?;
        self.raw.get(inner..inner + len)
    }
}

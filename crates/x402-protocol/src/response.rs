//! Typed extraction of the backend session payload.
//!
//! A poll answer is a flat JSON object carrying some subset of:
//! `accessGranted` (bool), `remainingSeconds` (integer), `currency` or
//! `token` (string tag), `amount` (number), `walletAddress` and `txHash`
//! (strings). Every extractor degrades to a documented default instead of
//! failing; see the crate docs for why.
//!
//! # Examples
//!
//! ```
//! use x402_core::Currency;
//! use x402_protocol::SessionResponse;
//!
//! let body = r#"{"accessGranted":true,"remainingSeconds":90,"token":"USDC","amount":0.5}"#;
//! let response = SessionResponse::parse(body);
//!
//! assert!(response.access_granted);
//! assert_eq!(response.remaining_seconds, 90);
//! assert_eq!(response.currency, Currency::Usdc);
//! assert_eq!(response.amount, 0.5);
//! ```

use serde::Serialize;
use x402_core::Currency;

use crate::scan::JsonScanner;

/// True iff the body carries `accessGranted` with the literal value `true`.
///
/// Anything else (literal `false`, missing key, malformed value) is `false`.
/// This is an extraction default, not a verdict: callers must not treat it
/// as an authoritative denial.
#[must_use]
pub fn parse_access_granted(body: &str) -> bool {
    JsonScanner::new(body).bool_value("accessGranted") == Some(true)
}

/// Remaining session seconds, or 0.
///
/// There is deliberately no distinction between "key absent" and "value is
/// a literal 0"; the session state machine, not this number, decides
/// whether access is granted.
#[must_use]
pub fn parse_remaining_seconds(body: &str) -> u32 {
    JsonScanner::new(body).u32_value("remainingSeconds").unwrap_or(0)
}

/// Currency tag from either the `currency` or the `token` key.
///
/// USDC is checked before TSE across both keys, so when the body carries
/// conflicting tags the USDC match wins. No tag maps to
/// [`Currency::Unknown`], never inferred from other fields.
#[must_use]
pub fn parse_currency(body: &str) -> Currency {
    let scanner = JsonScanner::new(body);

    for code in ["USDC", "TSE"] {
        if scanner.str_value("currency") == Some(code) || scanner.str_value("token") == Some(code) {
            return Currency::from_code(code);
        }
    }

    Currency::Unknown
}

/// Everything the wire said, in one pass.
///
/// This is "what the backend claimed", not "what the device believes"; the
/// session model in `x402-session` owns the latter and decides what to
/// absorb from here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionResponse<'a> {
    /// `accessGranted` was literally `true`.
    pub access_granted: bool,

    /// `remainingSeconds`, defaulting to 0 when absent or malformed.
    pub remaining_seconds: u32,

    /// Recognized currency tag, [`Currency::Unknown`] otherwise.
    pub currency: Currency,

    /// Payment amount, defaulting to 0.0 when absent.
    pub amount: f64,

    /// `walletAddress` if present; `None` means "leave the previous value
    /// alone", not "clear it".
    pub wallet_address: Option<&'a str>,

    /// `txHash`, same retention semantics as `wallet_address`.
    pub tx_hash: Option<&'a str>,
}

impl<'a> SessionResponse<'a> {
    /// Extract all session fields from a raw response body.
    ///
    /// Never fails: a garbage body parses as the all-defaults response
    /// (`access_granted == false`, zero time, unknown currency).
    #[must_use]
    pub fn parse(body: &'a str) -> Self {
        let scanner = JsonScanner::new(body);

        Self {
            access_granted: parse_access_granted(body),
            remaining_seconds: parse_remaining_seconds(body),
            currency: parse_currency(body),
            amount: scanner.f64_value("amount").unwrap_or(0.0),
            wallet_address: scanner.str_value("walletAddress"),
            tx_hash: scanner.str_value("txHash"),
        }
    }
}

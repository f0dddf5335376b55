//! Property-based tests for the response scanner.
//!
//! These tests use proptest to generate random payloads and verify that the
//! parser invariants hold: no panic on any input, defaults on absence, and
//! faithful extraction of well-formed fields.

use proptest::prelude::*;
use x402_core::Currency;
use x402_protocol::{
    JsonScanner, SessionResponse, parse_access_granted, parse_currency, parse_remaining_seconds,
};

/// Strategy for arbitrary response bodies, including non-JSON garbage.
fn arbitrary_body() -> impl Strategy<Value = String> {
    prop::string::string_regex(".{0,200}").expect("Failed to create body regex strategy")
}

/// Strategy for wallet-ish string values without quotes or backslashes.
fn plain_string_value() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9A-Za-z]{1,44}")
        .expect("Failed to create string value regex strategy")
}

proptest! {
    /// Property: no input crashes the parser, and extraction is total.
    #[test]
    fn prop_parser_never_panics(body in arbitrary_body()) {
        let _ = parse_access_granted(&body);
        let _ = parse_remaining_seconds(&body);
        let _ = parse_currency(&body);
        let _ = SessionResponse::parse(&body);
    }

    /// Property: a well-formed remainingSeconds field roundtrips exactly.
    #[test]
    fn prop_remaining_seconds_roundtrip(seconds in any::<u32>()) {
        let body = format!(r#"{{"accessGranted":true,"remainingSeconds":{}}}"#, seconds);
        prop_assert_eq!(parse_remaining_seconds(&body), seconds);
    }

    /// Property: a granted flag embedded among arbitrary sibling string
    /// fields is still found.
    #[test]
    fn prop_access_granted_found_among_siblings(
        wallet in plain_string_value(),
        tx in plain_string_value(),
    ) {
        let body = format!(
            r#"{{"walletAddress":"{}","accessGranted":true,"txHash":"{}"}}"#,
            wallet, tx
        );
        prop_assert!(parse_access_granted(&body));

        let response = SessionResponse::parse(&body);
        prop_assert_eq!(response.wallet_address, Some(wallet.as_str()));
        prop_assert_eq!(response.tx_hash, Some(tx.as_str()));
    }

    /// Property: string extraction returns exactly the bytes between the
    /// quotes for escape-free values.
    #[test]
    fn prop_str_value_exact(value in plain_string_value()) {
        let body = format!(r#"{{"walletAddress":"{}"}}"#, value);
        let scanner = JsonScanner::new(&body);
        prop_assert_eq!(scanner.str_value("walletAddress"), Some(value.as_str()));
    }

    /// Property: currency parsing only ever recognizes the two known tags.
    #[test]
    fn prop_unknown_tags_never_inferred(tag in "[A-Z]{2,6}") {
        let body = format!(r#"{{"currency":"{}"}}"#, tag);
        let parsed = parse_currency(&body);
        if tag == "USDC" {
            prop_assert_eq!(parsed, Currency::Usdc);
        } else if tag == "TSE" {
            prop_assert_eq!(parsed, Currency::Tse);
        } else {
            prop_assert_eq!(parsed, Currency::Unknown);
        }
    }
}

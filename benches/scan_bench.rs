//! Performance benchmarks for the response scanner.
//!
//! The scanner runs on every poll answer, so extraction of a full session
//! payload should stay comfortably in the microsecond range even on the
//! weakest targets we emulate here.
//!
//! Run benchmarks with:
//! ```sh
//! cargo bench --bench scan_bench
//! ```

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use x402_protocol::{JsonScanner, SessionResponse};

/// Compact active-session body as the backend sends it.
const ACTIVE_BODY: &str =
    r#"{"accessGranted":true,"remainingSeconds":540,"currency":"TSE","amount":2.0,"walletAddress":"9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin","txHash":"5UfDu8pNmA"}"#;

/// Worst case for the key search: the wanted keys sit at the very end of a
/// padded body.
fn padded_body() -> String {
    let mut body = String::from("{\"padding\":\"");
    body.push_str(&"x".repeat(3500));
    body.push_str("\",\"accessGranted\":true,\"remainingSeconds\":90}");
    body
}

/// Benchmark extracting all session fields from a typical body.
fn bench_full_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_extraction");
    group.throughput(Throughput::Bytes(ACTIVE_BODY.len() as u64));

    group.bench_function("session_response_parse", |b| {
        b.iter(|| {
            let response = SessionResponse::parse(black_box(ACTIVE_BODY));
            black_box(response);
        });
    });

    group.finish();
}

/// Benchmark single-field lookups.
fn bench_single_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_field");
    group.throughput(Throughput::Elements(1));

    group.bench_function("bool_value", |b| {
        b.iter(|| {
            let scanner = JsonScanner::new(black_box(ACTIVE_BODY));
            black_box(scanner.bool_value("accessGranted"));
        });
    });

    group.bench_function("u32_value", |b| {
        b.iter(|| {
            let scanner = JsonScanner::new(black_box(ACTIVE_BODY));
            black_box(scanner.u32_value("remainingSeconds"));
        });
    });

    group.finish();
}

/// Benchmark scanning a body padded to the size cap.
fn bench_padded_body(c: &mut Criterion) {
    let body = padded_body();

    let mut group = c.benchmark_group("padded_body");
    group.throughput(Throughput::Bytes(body.len() as u64));

    group.bench_function("keys_at_end", |b| {
        b.iter(|| {
            let response = SessionResponse::parse(black_box(body.as_str()));
            black_box(response);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_full_extraction,
    bench_single_field,
    bench_padded_body
);
criterion_main!(benches);

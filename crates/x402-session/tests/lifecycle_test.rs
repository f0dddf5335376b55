//! End-to-end session lifecycle: a device walking through a complete
//! payment cycle, driven only by poll results and the injected clock.

use std::time::Duration;

use x402_core::{Currency, DeviceConfig, DeviceType, SessionStatus};
use x402_session::{MockClock, SessionEvents, SessionMachine};

/// Collects callbacks in order for whole-flow assertions.
#[derive(Default)]
struct FlowRecorder {
    log: Vec<String>,
}

impl SessionEvents for FlowRecorder {
    fn on_status_changed(&mut self, status: SessionStatus, remaining_seconds: u32) {
        self.log.push(format!("status:{status}:{remaining_seconds}"));
    }

    fn on_payment_observed(&mut self, currency: Currency, amount: f64) {
        self.log.push(format!("payment:{}:{amount}", currency.code()));
    }
}

fn coffee_machine() -> (SessionMachine<MockClock>, MockClock) {
    let config = DeviceConfig::builder("espresso-01", "s3cret")
        .device_type(DeviceType::CoffeeMachine)
        .build()
        .unwrap();
    let clock = MockClock::new();
    (SessionMachine::with_clock(config, clock.clone()), clock)
}

#[test]
fn test_full_payment_cycle() {
    let (mut machine, clock) = coffee_machine();
    let mut events = FlowRecorder::default();

    // Device boots, backend wants payment.
    machine.handle_response(402, r#"{"token":"USDC","amount":0.25}"#, &mut events).unwrap();
    assert_eq!(machine.status(), SessionStatus::PaymentRequired);

    // A few polls later nothing changed; no duplicate notifications.
    machine.handle_response(402, r#"{"token":"USDC","amount":0.25}"#, &mut events).unwrap();
    machine.handle_response(402, r#"{"token":"USDC","amount":0.25}"#, &mut events).unwrap();

    // Payment clears: 10 minutes of coffee.
    let granted =
        r#"{"accessGranted":true,"remainingSeconds":600,"token":"USDC","amount":0.25,"txHash":"3nKtqw"}"#;
    machine.handle_response(200, granted, &mut events).unwrap();
    assert_eq!(machine.status(), SessionStatus::Active);
    assert_eq!(machine.session().tx_hash, "3nKtqw");

    // Mid-session polls refresh the expiry quietly.
    clock.advance(Duration::from_secs(300));
    let refreshed = r#"{"accessGranted":true,"remainingSeconds":300,"token":"USDC"}"#;
    machine.handle_response(200, refreshed, &mut events).unwrap();

    // Time runs out.
    clock.advance(Duration::from_secs(301));
    machine.tick(&mut events);
    assert_eq!(machine.status(), SessionStatus::Expired);

    assert_eq!(
        events.log,
        vec![
            "status:PaymentRequired:0",
            "status:Active:600",
            "payment:USDC:0.25",
            "status:Expired:0",
        ]
    );
}

#[test]
fn test_transport_failures_do_not_advance_state() {
    let (mut machine, clock) = coffee_machine();
    let mut events = FlowRecorder::default();

    machine
        .handle_response(200, r#"{"accessGranted":true,"remainingSeconds":60,"currency":"TSE"}"#, &mut events)
        .unwrap();
    assert_eq!(machine.status(), SessionStatus::Active);

    // Backend hiccups: 404 then 500. Status holds, retry cadence is idle.
    assert!(machine.handle_response(404, "", &mut events).is_err());
    assert!(machine.handle_response(500, "<html>oops</html>", &mut events).is_err());
    assert_eq!(machine.status(), SessionStatus::Active);
    assert_eq!(machine.retry_interval(), machine.config().poll_interval_idle);

    // Session still expires on the local clock even while the backend is
    // unreachable.
    clock.advance(Duration::from_secs(61));
    machine.tick(&mut events);
    assert_eq!(machine.status(), SessionStatus::Expired);
}

#[test]
fn test_user_end_then_fresh_cycle() {
    let (mut machine, _clock) = coffee_machine();
    let mut events = FlowRecorder::default();

    machine
        .handle_response(200, r#"{"accessGranted":true,"remainingSeconds":120,"currency":"TSE","amount":1.0}"#, &mut events)
        .unwrap();

    // User walks away and ends the session from the app.
    machine.end_session(&mut events).unwrap();
    assert_eq!(machine.status(), SessionStatus::Ended);

    // Denials while ended are quiet; a fresh payment re-arms.
    machine.handle_response(402, "{}", &mut events).unwrap();
    assert_eq!(machine.status(), SessionStatus::Ended);

    machine
        .handle_response(200, r#"{"accessGranted":true,"remainingSeconds":120,"currency":"TSE","amount":1.0}"#, &mut events)
        .unwrap();
    assert_eq!(machine.status(), SessionStatus::Active);

    assert_eq!(
        events.log,
        vec![
            "status:Active:120",
            "payment:TSE:1",
            "status:Ended:0",
            "status:Active:120",
            "payment:TSE:1",
        ]
    );
}

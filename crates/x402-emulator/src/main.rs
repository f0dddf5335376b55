//! Scripted end-to-end demo of the X.402 device client.
//!
//! Walks an emulated coffee machine through a full payment cycle against a
//! scripted backend: payment prompt, payment settlement, active countdown,
//! a transport dropout, and finally a backend revocation. Run with
//! `cargo run --bin x402-demo`; set `RUST_LOG=debug` for the transition
//! log.

use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use x402_client::{MockTransport, PollClient};
use x402_core::{DeviceConfig, DeviceType, SessionStatus};
use x402_emulator::DeviceEmulator;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = DeviceConfig::builder("espresso-01", "demo-secret")
        .device_type(DeviceType::CoffeeMachine)
        // Compressed cadence so the demo finishes in a few seconds.
        .poll_interval_idle(Duration::from_millis(300))
        .poll_interval_active(Duration::from_millis(600))
        .build()?;

    let (transport, backend) = MockTransport::new();
    backend.push_response(402, r#"{"token":"USDC","amount":0.25}"#);
    backend.push_response(402, r#"{"token":"USDC","amount":0.25}"#);
    backend.push_response(
        200,
        r#"{"accessGranted":true,"remainingSeconds":10,"currency":"USDC","amount":0.25,"txHash":"0xa1b2c3"}"#,
    );
    backend.push_response(200, r#"{"accessGranted":true,"remainingSeconds":8}"#);
    backend.push_failure("radio dropout");
    backend.push_response(200, r#"{"accessGranted":true,"remainingSeconds":5}"#);
    backend.push_response(200, r#"{"accessGranted":false}"#);

    let mut client = PollClient::new(config, transport);
    let mut device = DeviceEmulator::new(DeviceType::CoffeeMachine);

    println!("{}", device.render());

    loop {
        let delay = client.poll_once(&mut device).await;
        device.service_display();

        println!(
            "status: {:<15} relay: {}",
            client.machine().status().to_string(),
            if device.output_enabled() { "ON" } else { "off" }
        );
        println!("{}", device.render());

        if client.machine().status() == SessionStatus::Ended {
            break;
        }
        tokio::time::sleep(delay).await;
    }

    println!("session ended after {} transitions", client.machine().history().len());
    Ok(())
}

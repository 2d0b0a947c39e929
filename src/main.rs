//! Dimmer Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  LedcPwm (PwmPort)   RmtStatusLed (LedTxPort)   BlinkDelay     │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              Controller (pure logic)                   │    │
//! │  │  Router · Channel store · Status indicator             │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Attribute queue (control layer → loop) · Task watchdog        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use dimmer::adapters::delay::BlinkDelay;
use dimmer::adapters::ledc::LedcPwm;
use dimmer::adapters::rmt::RmtStatusLed;
use dimmer::app::service::Controller;
use dimmer::config::DriverConfig;
use dimmer::drivers::{hw_init, watchdog::Watchdog};
use dimmer::{events, pins};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Dimmer v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = DriverConfig::load();
    for (name, gpio) in pins::CHANNEL_NAMES.iter().zip(pins::PWM_GPIOS) {
        info!("  {} -> GPIO {}", name, gpio);
    }
    info!(
        "  PWM {} Hz / {}-bit, status LED on GPIO {}",
        config.pwm_frequency_hz,
        config.pwm_resolution_bits,
        pins::RGB_LED_GPIO
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);
    if let Err(e) = hw_init::init_ledc(&config) {
        // Without PWM there is nothing to control. Halt; the watchdog
        // resets the device.
        error!("LEDC init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let status_led = RmtStatusLed::new(pins::RGB_LED_GPIO, &config);

    // ── 4. Core ───────────────────────────────────────────────
    let mut controller = Controller::init(config, LedcPwm::new(), status_led, &mut BlinkDelay)?;

    // Endpoint ids come from the control layer; channel order.
    let assigned = controller.config().endpoint_ids.map(Some);
    if let Err(e) = controller.bind_endpoints(assigned) {
        error!("Endpoint binding failed: {}; attribute events will be ignored", e);
    }

    let poll = std::time::Duration::from_millis(u64::from(controller.config().event_poll_interval_ms));

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        let handled = events::drain_attribute_events(|event| {
            controller.on_endpoint_event(event);
        });
        if handled > 0 {
            log::debug!("Applied {} attribute event(s)", handled);
        }
        watchdog.feed();
        std::thread::sleep(poll);
    }
}

//! Blocking delay for the startup blink.
//!
//! On ESP-IDF the HAL's FreeRTOS delay already implements
//! [`DelayNs`]; on host a thread sleep stands in.

use embedded_hal::delay::DelayNs;

#[cfg(target_os = "espidf")]
pub use esp_idf_hal::delay::FreeRtos as BlinkDelay;

#[cfg(not(target_os = "espidf"))]
pub use self::ThreadDelay as BlinkDelay;

/// `std::thread::sleep`-backed delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(core::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(core::time::Duration::from_millis(u64::from(ms)));
    }
}

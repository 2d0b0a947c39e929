//! Driver configuration parameters
//!
//! All tunable parameters for the dimmer core. Defaults match the shipped
//! board; a JSON override can be baked in at build time through the
//! `DIMMER_CONFIG_JSON` environment variable (see [`DriverConfig::load`]).

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::channels::CHANNEL_COUNT;
use crate::channels::router::EndpointId;
use crate::error::ConfigError;

/// JSON override captured at build time, if any.
const CONFIG_OVERRIDE: Option<&str> = option_env!("DIMMER_CONFIG_JSON");

/// Order in which a byte's bits go out on the status LED line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitOrder {
    MsbFirst,
    LsbFirst,
}

/// Order in which colour components go out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColourOrder {
    /// WS2812 / SK6812 default.
    Grb,
    Rgb,
    Brg,
}

/// High/low pulse durations for the two bit values, in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitTimingNs {
    pub t0_high_ns: u32,
    pub t0_low_ns: u32,
    pub t1_high_ns: u32,
    pub t1_low_ns: u32,
}

impl Default for BitTimingNs {
    /// 1:3 and 3:1 high/low ratios, 1.2 µs bit period.
    fn default() -> Self {
        Self {
            t0_high_ns: 300,
            t0_low_ns: 900,
            t1_high_ns: 900,
            t1_low_ns: 300,
        }
    }
}

/// Core driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    // --- PWM ---
    /// LEDC timer frequency in Hz
    pub pwm_frequency_hz: u32,
    /// LEDC duty resolution in bits (duty range `0..2^bits`)
    pub pwm_resolution_bits: u8,

    // --- Status LED transmit channel ---
    /// RMT tick rate
    pub status_resolution_hz: u32,
    /// RMT memory block size in symbols
    pub status_mem_block_symbols: usize,
    /// Frames the driver may queue; one outstanding frame is the design point
    pub status_queue_depth: usize,
    /// Upper bound on waiting for a frame to finish
    pub status_tx_timeout_ms: u32,
    pub status_bit_timing: BitTimingNs,
    pub status_bit_order: BitOrder,
    pub status_colour_order: ColourOrder,

    // --- Startup blink ---
    /// Colour shown once the status LED is up
    pub startup_colour: (u8, u8, u8),
    /// How long the startup colour is held before switching off (0 = no blink)
    pub startup_blink_ms: u32,

    // --- Endpoints ---
    /// Endpoint ids the control layer assigns, in channel order
    pub endpoint_ids: [EndpointId; CHANNEL_COUNT],

    // --- Timing ---
    /// Sleep between attribute-queue drains in the control loop
    pub event_poll_interval_ms: u32,
    /// Task watchdog timeout for the control loop
    pub watchdog_timeout_ms: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            // PWM
            pwm_frequency_hz: 5_000,
            pwm_resolution_bits: 8,

            // Status LED
            status_resolution_hz: 10_000_000, // 100 ns per tick
            status_mem_block_symbols: 64,
            status_queue_depth: 1,
            status_tx_timeout_ms: 100,
            status_bit_timing: BitTimingNs::default(),
            status_bit_order: BitOrder::MsbFirst,
            status_colour_order: ColourOrder::Grb,

            // Startup blink
            startup_colour: (0, 255, 0),
            startup_blink_ms: 300,

            // Endpoint 0 is the control layer's root node.
            endpoint_ids: [1, 2, 3],

            // Timing
            event_poll_interval_ms: 10,
            watchdog_timeout_ms: 10_000,
        }
    }
}

impl DriverConfig {
    /// Reject values the hardware or the duty mapping cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pwm_frequency_hz == 0 {
            return Err(ConfigError::Invalid("pwm_frequency_hz must be non-zero"));
        }
        // Duty values are u8 end to end.
        if self.pwm_resolution_bits != 8 {
            return Err(ConfigError::Invalid("pwm_resolution_bits must be 8"));
        }
        if self.status_resolution_hz == 0 {
            return Err(ConfigError::Invalid("status_resolution_hz must be non-zero"));
        }
        if self.status_mem_block_symbols == 0 {
            return Err(ConfigError::Invalid("status_mem_block_symbols must be non-zero"));
        }
        if self.status_queue_depth == 0 {
            return Err(ConfigError::Invalid("status_queue_depth must be at least 1"));
        }
        if self.status_tx_timeout_ms == 0 {
            return Err(ConfigError::Invalid("status_tx_timeout_ms must be non-zero"));
        }
        let t = &self.status_bit_timing;
        if t.t0_high_ns == 0 || t.t0_low_ns == 0 || t.t1_high_ns == 0 || t.t1_low_ns == 0 {
            return Err(ConfigError::Invalid("status_bit_timing durations must be non-zero"));
        }
        if self.event_poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("event_poll_interval_ms must be non-zero"));
        }
        if self.event_poll_interval_ms >= self.watchdog_timeout_ms {
            return Err(ConfigError::Invalid(
                "event_poll_interval_ms must be shorter than watchdog_timeout_ms",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields are an error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, or the build-time override when one was supplied and is valid.
    pub fn load() -> Self {
        Self::resolve(CONFIG_OVERRIDE)
    }

    fn resolve(json: Option<&str>) -> Self {
        match json {
            None => Self::default(),
            Some(json) => match Self::from_json(json) {
                Ok(config) => {
                    info!("Config: using build-time override");
                    config
                }
                Err(e) => {
                    warn!("Config: override rejected ({}), using defaults", e);
                    Self::default()
                }
            },
        }
    }
}

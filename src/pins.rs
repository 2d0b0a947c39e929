//! GPIO / peripheral assignments for the ESP32-C6 dimmer board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

use crate::channels::CHANNEL_COUNT;

// ---------------------------------------------------------------------------
// Dimmer outputs (LEDC PWM, one channel per output)
// ---------------------------------------------------------------------------

pub const PWM_CHANNEL_0_GPIO: i32 = 4;
pub const PWM_CHANNEL_1_GPIO: i32 = 5;
pub const PWM_CHANNEL_2_GPIO: i32 = 6;

/// Channel index → GPIO. Must stay injective.
pub const PWM_GPIOS: [i32; CHANNEL_COUNT] =
    [PWM_CHANNEL_0_GPIO, PWM_CHANNEL_1_GPIO, PWM_CHANNEL_2_GPIO];

/// Channel index → LEDC channel number.
pub const LEDC_CHANNELS: [u32; CHANNEL_COUNT] = [0, 1, 2];

/// All three outputs share LEDC timer 0.
pub const LEDC_TIMER: u32 = 0;

/// Names the outputs carry in logs and in the control layer.
pub const CHANNEL_NAMES: [&str; CHANNEL_COUNT] = ["PWM GPIO4", "PWM GPIO5", "PWM GPIO6"];

// ---------------------------------------------------------------------------
// Status LED (single WS2812B on the RMT peripheral)
// ---------------------------------------------------------------------------

pub const RGB_LED_GPIO: i32 = 8;

//! Level → duty mapping.
//!
//! Levels span `0..=254`, the 8-bit LEDC duty spans `0..=255`. The mapping is
//! a true linear rescale rounded half-up:
//!
//! ```text
//! duty = (level * 255 + 127) / 254
//! ```
//!
//! so both ends line up (`0 → 0`, `254 → 255`) and the midpoint lands on
//! `127 → 128`. Passing the level straight through would leave duty 255
//! unreachable.

use super::Level;

/// Full-scale 8-bit duty.
pub const DUTY_MAX: u8 = u8::MAX;

/// Map a logical level onto the physical duty range.
pub const fn map(level: Level) -> u8 {
    let level = level.get() as u16;
    let max = Level::MAX.get() as u16;
    ((level * DUTY_MAX as u16 + max / 2) / max) as u8
}

/// Duty as a percentage of full scale, for logs.
pub fn percent(duty: u8) -> f32 {
    duty as f32 / DUTY_MAX as f32 * 100.0
}

//! Dimmer channel subsystem.
//!
//! - [`duty`]: logical level → physical duty mapping.
//! - [`store`]: per-channel `{enabled, level}` state; sole writer of PWM.
//! - [`router`]: endpoint id → channel resolution and attribute dispatch.

pub mod duty;
pub mod router;
pub mod store;

use core::fmt;

/// Number of independently dimmed outputs on the board.
pub const CHANNEL_COUNT: usize = 3;

/// A channel index that is known to be in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelIndex(u8);

impl ChannelIndex {
    /// `None` for `raw >= CHANNEL_COUNT`.
    pub const fn new(raw: u8) -> Option<Self> {
        if (raw as usize) < CHANNEL_COUNT {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub(crate) const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Every channel, in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CHANNEL_COUNT as u8).map(Self)
    }
}

impl fmt::Display for ChannelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch{}", self.0)
    }
}

/// Logical brightness level, `0..=254`.
///
/// 255 is not a level: the control layer uses it as "no value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(254);

    pub const fn new(raw: u8) -> Option<Self> {
        if raw <= Self::MAX.0 { Some(Self(raw)) } else { None }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Level as a percentage of full scale, for logs.
    pub fn percent(self) -> f32 {
        self.0 as f32 / Self::MAX.0 as f32 * 100.0
    }
}

impl Default for Level {
    /// Channels come up at full level (but disabled).
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u8> for Level {
    type Error = u8;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(raw)
    }
}

/// Stored state of one channel. Always read and written as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelState {
    pub enabled: bool,
    pub level: Level,
}

impl ChannelState {
    /// Duty this state should drive: `map(level)` when enabled, else 0.
    pub fn duty(self) -> u8 {
        if self.enabled { duty::map(self.level) } else { 0 }
    }
}

impl Default for ChannelState {
    fn default() -> Self {
        Self {
            enabled: false,
            level: Level::default(),
        }
    }
}

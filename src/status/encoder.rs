//! Single-wire LED signal encoder.
//!
//! Every data bit becomes one two-level [`Symbol`]: a `1` is a long high
//! pulse followed by a short low, a `0` is a short high followed by a long
//! low. The LED tells the two apart by the high/low ratio, so the ratio is
//! what matters; the absolute unit only has to sit inside the part's
//! tolerance band.
//!
//! ```text
//!          ┌────────┐                ┌──┐
//!   bit 1  │  T1H   │ T1L      bit 0 │T0H│    T0L
//!        ──┘        └───           ──┘   └─────────
//! ```
//!
//! The encoder holds no per-frame state and is configured once.

use heapless::Vec;

use crate::config::{BitOrder, BitTimingNs};
use crate::error::EncodeError;

/// Symbols that fit in one RMT memory block.
pub const MAX_FRAME_SYMBOLS: usize = 64;

/// Largest frame, in bytes, that [`BytesEncoder::encode`] accepts.
pub const MAX_FRAME_BYTES: usize = MAX_FRAME_SYMBOLS / 8;

/// Encoded frame buffer.
pub type SymbolBuf = Vec<Symbol, MAX_FRAME_SYMBOLS>;

/// One hardware symbol: a level held for `duration0` ticks, then another
/// level held for `duration1` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub level0: bool,
    pub duration0: u16,
    pub level1: bool,
    pub duration1: u16,
}

impl Symbol {
    /// Durations are 15-bit on the wire.
    pub const MAX_DURATION: u16 = 0x7FFF;

    /// High for `high` ticks, then low for `low` ticks.
    pub const fn pulse(high: u16, low: u16) -> Self {
        Self {
            level0: true,
            duration0: high,
            level1: false,
            duration1: low,
        }
    }

    /// Pack into the RMT symbol word: `duration0` in bits 0–14, `level0` in
    /// bit 15, `duration1` in bits 16–30, `level1` in bit 31.
    pub const fn to_word(self) -> u32 {
        (self.duration0 & Self::MAX_DURATION) as u32
            | (self.level0 as u32) << 15
            | ((self.duration1 & Self::MAX_DURATION) as u32) << 16
            | (self.level1 as u32) << 31
    }
}

/// Pulse shapes for the two bit values, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitTiming {
    pub bit0: Symbol,
    pub bit1: Symbol,
}

impl BitTiming {
    /// Convert nanosecond durations to ticks at `resolution_hz`.
    pub fn from_ns(ns: &BitTimingNs, resolution_hz: u32) -> Result<Self, EncodeError> {
        Ok(Self {
            bit0: Symbol::pulse(
                ns_to_ticks(ns.t0_high_ns, resolution_hz)?,
                ns_to_ticks(ns.t0_low_ns, resolution_hz)?,
            ),
            bit1: Symbol::pulse(
                ns_to_ticks(ns.t1_high_ns, resolution_hz)?,
                ns_to_ticks(ns.t1_low_ns, resolution_hz)?,
            ),
        })
    }
}

/// Round to the nearest tick; zero and >15-bit results are configuration
/// errors.
fn ns_to_ticks(nanos: u32, resolution_hz: u32) -> Result<u16, EncodeError> {
    let ticks = (u64::from(nanos) * u64::from(resolution_hz) + 500_000_000) / 1_000_000_000;
    if ticks == 0 {
        return Err(EncodeError::DurationTooShort { nanos });
    }
    if ticks > u64::from(Symbol::MAX_DURATION) {
        return Err(EncodeError::DurationTooLong { nanos });
    }
    Ok(ticks as u16)
}

/// Byte → symbol encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BytesEncoder {
    timing: BitTiming,
    order: BitOrder,
}

impl BytesEncoder {
    pub const fn new(timing: BitTiming, order: BitOrder) -> Self {
        Self { timing, order }
    }

    pub fn timing(&self) -> &BitTiming {
        &self.timing
    }

    /// Eight symbols for one byte, in transmission order.
    pub fn encode_byte(&self, byte: u8) -> [Symbol; 8] {
        core::array::from_fn(|i| {
            let bit = match self.order {
                BitOrder::MsbFirst => 7 - i,
                BitOrder::LsbFirst => i,
            };
            if (byte >> bit) & 1 == 1 {
                self.timing.bit1
            } else {
                self.timing.bit0
            }
        })
    }

    /// Encode a whole frame into `out`, replacing its contents.
    pub fn encode(&self, bytes: &[u8], out: &mut SymbolBuf) -> Result<(), EncodeError> {
        out.clear();
        if bytes.len() > MAX_FRAME_BYTES {
            return Err(EncodeError::FrameTooLong { bytes: bytes.len() });
        }
        for &byte in bytes {
            out.extend(self.encode_byte(byte));
        }
        Ok(())
    }
}

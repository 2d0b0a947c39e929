//! Port traits: the hexagonal boundary between domain logic and hardware.
//!
//! ```text
//!   Controller ──▶ Port trait ──▶ Adapter (LEDC / RMT / mock)
//! ```
//!
//! Driven adapters implement these traits. The domain types consume them via
//! generics, so the core never touches a peripheral register directly.

use crate::channels::ChannelIndex;
use crate::error::{PwmError, TxError};
use crate::status::encoder::Symbol;

// ───────────────────────────────────────────────────────────────
// PWM port (domain → LEDC)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the dimmer outputs.
///
/// Only [`ChannelStore`](crate::channels::store::ChannelStore) calls this.
pub trait PwmPort {
    /// Latch `duty` (0–255) into the channel's PWM output.
    fn set_duty(&mut self, channel: ChannelIndex, duty: u8) -> Result<(), PwmError>;
}

// ───────────────────────────────────────────────────────────────
// Status LED transmit port (domain → RMT)
// ───────────────────────────────────────────────────────────────

/// One single-wire transmit channel.
///
/// The protocol has no flow control: callers must not submit a frame while
/// the previous one is still in flight. The
/// [`Transmitter`](crate::status::transmitter::Transmitter) enforces that.
pub trait LedTxPort {
    /// Queue an encoded frame. Returns once the frame is handed to the
    /// hardware, not when it has finished clocking out.
    fn transmit(&mut self, symbols: &[Symbol]) -> Result<(), TxError>;

    /// Block until the queued frame has gone out, or `timeout_ms` elapses
    /// ([`TxError::Timeout`]).
    fn wait_all_done(&mut self, timeout_ms: u32) -> Result<(), TxError>;
}

impl<T: PwmPort + ?Sized> PwmPort for &mut T {
    fn set_duty(&mut self, channel: ChannelIndex, duty: u8) -> Result<(), PwmError> {
        (**self).set_duty(channel, duty)
    }
}

impl<T: LedTxPort + ?Sized> LedTxPort for &mut T {
    fn transmit(&mut self, symbols: &[Symbol]) -> Result<(), TxError> {
        (**self).transmit(symbols)
    }

    fn wait_all_done(&mut self, timeout_ms: u32) -> Result<(), TxError> {
        (**self).wait_all_done(timeout_ms)
    }
}

//! Mock hardware adapters for integration tests.
//!
//! Record every port call so tests can assert on the full write history
//! without touching real LEDC/RMT registers.

use dimmer::app::ports::{LedTxPort, PwmPort};
use dimmer::channels::ChannelIndex;
use dimmer::error::{PwmError, TxError};
use dimmer::status::encoder::Symbol;
use embedded_hal::delay::DelayNs;

// ── PWM ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockPwm {
    /// `(channel, duty)` in call order.
    pub writes: Vec<(u8, u8)>,
    /// Fail every write with this error.
    pub fail: Option<PwmError>,
}

#[allow(dead_code)]
impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes_to(&self, channel: u8) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, d)| *d)
            .collect()
    }

    pub fn last_duty(&self, channel: u8) -> Option<u8> {
        self.writes_to(channel).last().copied()
    }
}

impl PwmPort for MockPwm {
    fn set_duty(&mut self, channel: ChannelIndex, duty: u8) -> Result<(), PwmError> {
        self.writes.push((channel.get(), duty));
        match self.fail {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── Status LED line ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum LineCall {
    Transmit(Vec<Symbol>),
    Wait,
}

/// Single-wire line model: after each frame the line stays busy for
/// `busy_waits` completion waits, each of which reports a timeout.
#[derive(Default)]
pub struct MockLedTx {
    pub calls: Vec<LineCall>,
    pub busy_waits: u32,
    pub reject_transmit: bool,
    remaining: u32,
    /// Set if a frame was ever submitted while another was on the line.
    pub overlapped: bool,
}

#[allow(dead_code)]
impl MockLedTx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_busy_waits(busy_waits: u32) -> Self {
        Self {
            busy_waits,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> Vec<&[Symbol]> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                LineCall::Transmit(s) => Some(s.as_slice()),
                LineCall::Wait => None,
            })
            .collect()
    }
}

impl LedTxPort for MockLedTx {
    fn transmit(&mut self, symbols: &[Symbol]) -> Result<(), TxError> {
        if self.reject_transmit {
            return Err(TxError::Driver(-1));
        }
        if self.remaining > 0 {
            self.overlapped = true;
        }
        self.calls.push(LineCall::Transmit(symbols.to_vec()));
        self.remaining = self.busy_waits;
        Ok(())
    }

    fn wait_all_done(&mut self, _timeout_ms: u32) -> Result<(), TxError> {
        self.calls.push(LineCall::Wait);
        if self.remaining > 0 {
            self.remaining -= 1;
            return Err(TxError::Timeout);
        }
        Ok(())
    }
}

// ── Delay ─────────────────────────────────────────────────────

/// Records requested delays instead of sleeping.
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

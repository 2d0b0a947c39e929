//! Status LED transmitter.
//!
//! Owns the transmit port and the encoder for the life of the process and
//! enforces one frame on the line at a time.
//!
//! ```text
//!  Uninitialized ──init ok──▶ Ready ──transmit──▶ Transmitting
//!        │                     ▲                       │
//!        │                     └──done / timeout───────┘
//!        └──init failed──▶ Failed (terminal)
//! ```
//!
//! Nothing here is fatal. A failed init disables the status LED for good;
//! a failed or timed-out frame is logged and dropped without retry. The
//! dimmer outputs do not depend on any of it.

use log::{error, info, warn};

use super::encoder::{BytesEncoder, SymbolBuf};
use crate::app::ports::LedTxPort;
use crate::error::{EncodeError, HwInitError, TxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Uninitialized,
    Ready,
    Transmitting,
    Failed,
}

/// Lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxStats {
    pub frames_sent: u32,
    pub failures: u32,
    pub timeouts: u32,
}

/// Why `init` failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxInitError {
    Port(HwInitError),
    Encoder(EncodeError),
}

impl core::fmt::Display for TxInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Port(e) => write!(f, "{e}"),
            Self::Encoder(e) => write!(f, "{e}"),
        }
    }
}

pub struct Transmitter<L: LedTxPort> {
    state: TxState,
    port: Option<L>,
    encoder: Option<BytesEncoder>,
    symbols: SymbolBuf,
    timeout_ms: u32,
    /// The last wait timed out, so the line may still be clocking out.
    needs_drain: bool,
    stats: TxStats,
}

impl<L: LedTxPort> Transmitter<L> {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            state: TxState::Uninitialized,
            port: None,
            encoder: None,
            symbols: SymbolBuf::new(),
            timeout_ms,
            needs_drain: false,
            stats: TxStats::default(),
        }
    }

    /// Take ownership of the hardware channel and encoder. Only valid once.
    pub fn init(
        &mut self,
        port: Result<L, HwInitError>,
        encoder: Result<BytesEncoder, EncodeError>,
    ) -> Result<(), TxInitError> {
        if self.state != TxState::Uninitialized {
            warn!("Status LED: transmitter already initialised ({:?}), ignoring", self.state);
            return Ok(());
        }

        let result = match (port, encoder) {
            (Ok(port), Ok(encoder)) => {
                self.port = Some(port);
                self.encoder = Some(encoder);
                Ok(())
            }
            (Err(e), _) => Err(TxInitError::Port(e)),
            (_, Err(e)) => Err(TxInitError::Encoder(e)),
        };

        match result {
            Ok(()) => {
                self.state = TxState::Ready;
                info!("Status LED: transmitter ready (timeout {} ms)", self.timeout_ms);
            }
            Err(e) => {
                self.state = TxState::Failed;
                error!("Status LED: init failed ({}), status LED disabled", e);
            }
        }
        result
    }

    /// Encode `bytes` and hand the frame to the hardware.
    ///
    /// If a frame may still be on the line, waits for it first. When it is
    /// still going after the timeout the new frame is dropped rather than
    /// queued behind or on top of it.
    pub fn transmit(&mut self, bytes: &[u8]) -> bool {
        let (Some(port), Some(encoder)) = (self.port.as_mut(), self.encoder.as_ref()) else {
            warn!("Status LED: transmit skipped ({})", TxError::Disabled);
            return false;
        };

        if self.state == TxState::Transmitting || self.needs_drain {
            if let Err(e) = port.wait_all_done(self.timeout_ms) {
                warn!("Status LED: {} ({}), frame dropped", TxError::Busy, e);
                self.stats.failures += 1;
                return false;
            }
            self.needs_drain = false;
            self.state = TxState::Ready;
        }

        if let Err(e) = encoder.encode(bytes, &mut self.symbols) {
            warn!("Status LED: encode failed: {}", e);
            self.stats.failures += 1;
            return false;
        }

        match port.transmit(&self.symbols) {
            Ok(()) => {
                self.state = TxState::Transmitting;
                true
            }
            Err(e) => {
                warn!("Status LED: transmit failed: {}", e);
                self.stats.failures += 1;
                false
            }
        }
    }

    /// Block until the in-flight frame completes or `timeout_ms` passes.
    /// Returns to `Ready` either way.
    pub fn wait_complete(&mut self, timeout_ms: u32) -> bool {
        if self.state != TxState::Transmitting {
            return self.state == TxState::Ready;
        }
        let Some(port) = self.port.as_mut() else {
            return false;
        };

        let result = port.wait_all_done(timeout_ms);
        self.state = TxState::Ready;
        match result {
            Ok(()) => {
                self.stats.frames_sent += 1;
                true
            }
            Err(e) => {
                if e == TxError::Timeout {
                    self.stats.timeouts += 1;
                } else {
                    self.stats.failures += 1;
                }
                self.needs_drain = true;
                warn!("Status LED: frame not confirmed: {}", e);
                false
            }
        }
    }

    /// `transmit` then `wait_complete` with the configured timeout.
    pub fn send_frame(&mut self, bytes: &[u8]) -> bool {
        self.transmit(bytes) && self.wait_complete(self.timeout_ms)
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    pub fn stats(&self) -> TxStats {
        self.stats
    }

    pub fn port(&self) -> Option<&L> {
        self.port.as_ref()
    }
}

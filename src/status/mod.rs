//! Status LED subsystem.
//!
//! - [`encoder`]: bytes → single-wire pulse symbols.
//! - [`transmitter`]: one-frame-at-a-time hardware transmit state machine.
//!
//! [`StatusIndicator`] ties the two together behind a colour API.

pub mod encoder;
pub mod transmitter;

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::ports::LedTxPort;
use crate::config::ColourOrder;
use crate::error::{EncodeError, HwInitError};
use encoder::BytesEncoder;
use transmitter::{Transmitter, TxInitError, TxState, TxStats};

/// One colour, in logical component order. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColourFrame {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ColourFrame {
    pub const OFF: Self = Self::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Component bytes in the order the LED expects them.
    pub const fn to_wire(self, order: ColourOrder) -> [u8; 3] {
        let Self { red, green, blue } = self;
        match order {
            ColourOrder::Grb => [green, red, blue],
            ColourOrder::Rgb => [red, green, blue],
            ColourOrder::Brg => [blue, red, green],
        }
    }
}

impl From<(u8, u8, u8)> for ColourFrame {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

/// Single addressable status LED.
pub struct StatusIndicator<L: LedTxPort> {
    tx: Transmitter<L>,
    order: ColourOrder,
}

impl<L: LedTxPort> StatusIndicator<L> {
    pub fn new(order: ColourOrder, timeout_ms: u32) -> Self {
        Self {
            tx: Transmitter::new(timeout_ms),
            order,
        }
    }

    /// Hand the transmit channel and encoder to the transmitter. A failure
    /// leaves the indicator permanently disabled.
    pub fn init(
        &mut self,
        port: Result<L, HwInitError>,
        encoder: Result<BytesEncoder, EncodeError>,
    ) -> Result<(), TxInitError> {
        self.tx.init(port, encoder)
    }

    /// Show `colour` and wait for the frame to go out.
    pub fn show(&mut self, colour: ColourFrame) -> bool {
        self.tx.send_frame(&colour.to_wire(self.order))
    }

    /// Show an RGB colour. `false` if the frame did not make it; never an
    /// error.
    pub fn transmit_status_color(&mut self, red: u8, green: u8, blue: u8) -> bool {
        self.show(ColourFrame::new(red, green, blue))
    }

    /// Flash `colour` for `hold_ms`, then switch the LED off.
    pub fn startup_blink(&mut self, colour: ColourFrame, hold_ms: u32, delay: &mut impl DelayNs) {
        if self.tx.state() != TxState::Ready {
            warn!("Status LED: not ready ({:?}), skipping startup blink", self.tx.state());
            return;
        }
        if hold_ms == 0 {
            return;
        }
        info!(
            "Status LED: startup blink rgb({}, {}, {}) for {} ms",
            colour.red, colour.green, colour.blue, hold_ms
        );
        self.show(colour);
        delay.delay_ms(hold_ms);
        self.show(ColourFrame::OFF);
    }

    pub fn state(&self) -> TxState {
        self.tx.state()
    }

    pub fn stats(&self) -> TxStats {
        self.tx.stats()
    }

    pub fn port(&self) -> Option<&L> {
        self.tx.port()
    }
}

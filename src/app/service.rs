//! Application service: the composition root.
//!
//! [`Controller`] owns the channel store, the endpoint router and the status
//! indicator. It exposes the handful of entry points that are allowed to
//! touch hardware. All I/O flows through port traits injected at
//! construction, making the whole core testable with mock adapters.
//!
//! ```text
//!  AttributeEvent ──▶ ┌──────────────────────────┐ ──▶ PwmPort
//!                     │        Controller        │
//!   status colour ──▶ │ Router · Store · Status  │ ──▶ LedTxPort
//!                     └──────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::channels::router::{AttributeEvent, Dispatch, DispatchRouter, EndpointBinding, EndpointId};
use crate::channels::store::ChannelStore;
use crate::channels::{CHANNEL_COUNT, ChannelIndex, ChannelState, Level};
use crate::config::DriverConfig;
use crate::error::{BindingError, Error, HwInitError};
use crate::pins;
use crate::status::encoder::{BitTiming, BytesEncoder};
use crate::status::transmitter::{TxState, TxStats};
use crate::status::{ColourFrame, StatusIndicator};

use super::ports::{LedTxPort, PwmPort};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

pub struct Controller<P: PwmPort, L: LedTxPort> {
    config: DriverConfig,
    store: ChannelStore<P>,
    /// `None` until the control layer has assigned endpoints.
    router: Option<DispatchRouter>,
    status: StatusIndicator<L>,
}

impl<P: PwmPort, L: LedTxPort> Controller<P, L> {
    /// Bring the core up. Call once per boot.
    ///
    /// Every channel is driven to duty 0 (disabled, full level). A status
    /// LED that cannot be created is logged and left disabled; only an
    /// invalid configuration is fatal.
    pub fn init(
        config: DriverConfig,
        pwm: P,
        status_led: Result<L, HwInitError>,
        delay: &mut impl DelayNs,
    ) -> Result<Self, Error> {
        config.validate()?;

        let mut store = ChannelStore::new(pwm, pins::PWM_GPIOS)?;
        store.reassert_all();
        info!(
            "PWM: {} channels at {} Hz, {}-bit",
            CHANNEL_COUNT, config.pwm_frequency_hz, config.pwm_resolution_bits
        );

        let encoder = BitTiming::from_ns(&config.status_bit_timing, config.status_resolution_hz)
            .map(|timing| BytesEncoder::new(timing, config.status_bit_order));
        let mut status = StatusIndicator::new(config.status_colour_order, config.status_tx_timeout_ms);
        if status.init(status_led, encoder).is_ok() {
            status.startup_blink(
                ColourFrame::from(config.startup_colour),
                config.startup_blink_ms,
                delay,
            );
        }

        info!("Controller initialised");
        Ok(Self {
            config,
            store,
            router: None,
            status,
        })
    }

    /// Install the endpoint ids the control layer assigned, in channel
    /// order. `None` marks a channel whose endpoint could not be created.
    pub fn bind_endpoints(
        &mut self,
        assigned: [Option<EndpointId>; CHANNEL_COUNT],
    ) -> Result<(), BindingError> {
        if self.router.is_some() {
            warn!("Endpoints already bound, ignoring rebind");
            return Err(BindingError::AlreadyBound);
        }
        let binding = EndpointBinding::from_assigned(assigned)?;
        self.router = Some(DispatchRouter::new(binding));
        Ok(())
    }

    // ── Entry points ─────────────────────────────────────────

    /// Direct channel control by index. Works whether or not the channel
    /// has an endpoint.
    pub fn set_channel_power(&mut self, channel: u8, enabled: bool, level: Level) {
        self.store.set_channel_power(channel, enabled, level);
    }

    /// Route one attribute change to its channel.
    pub fn on_endpoint_event(&mut self, event: AttributeEvent) -> Dispatch {
        match &self.router {
            Some(router) => router.on_endpoint_event(&mut self.store, event),
            None => {
                warn!("Endpoint {} event before binding, ignoring", event.endpoint);
                Dispatch::Unbound
            }
        }
    }

    pub fn transmit_status_color(&mut self, red: u8, green: u8, blue: u8) -> bool {
        self.status.transmit_status_color(red, green, blue)
    }

    // ── Queries ──────────────────────────────────────────────

    pub fn channel_state(&self, index: ChannelIndex) -> ChannelState {
        self.store.state(index)
    }

    pub fn channel_states(&self) -> [ChannelState; CHANNEL_COUNT] {
        self.store.states()
    }

    pub fn binding(&self) -> Option<&EndpointBinding> {
        self.router.as_ref().map(DispatchRouter::binding)
    }

    pub fn status_state(&self) -> TxState {
        self.status.state()
    }

    pub fn status_stats(&self) -> TxStats {
        self.status.stats()
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn pwm(&self) -> &P {
        self.store.pwm()
    }

    pub fn status_port(&self) -> Option<&L> {
        self.status.port()
    }
}

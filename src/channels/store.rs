//! Channel state store.
//!
//! Owns the `{enabled, level}` pair of every channel together with the PWM
//! port, and is the only code that writes a duty to hardware.
//!
//! Every accepted update is written through to the port, even when the
//! stored value did not change. A glitch or a watchdog reset path can leave
//! the output out of step with the stored state; the next command puts it
//! back.

use log::{info, warn};

use super::{CHANNEL_COUNT, ChannelIndex, ChannelState, Level, duty};
use crate::app::ports::PwmPort;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy)]
struct Channel {
    state: ChannelState,
    /// Fixed at construction.
    gpio: i32,
}

pub struct ChannelStore<P: PwmPort> {
    channels: [Channel; CHANNEL_COUNT],
    pwm: P,
}

impl<P: PwmPort> ChannelStore<P> {
    /// Build the store with every channel disabled at full level.
    ///
    /// `gpios` maps channel index → output pin and must not repeat a pin.
    /// Nothing is written to hardware here; see [`reassert_all`](Self::reassert_all).
    pub fn new(pwm: P, gpios: [i32; CHANNEL_COUNT]) -> Result<Self, ConfigError> {
        for (i, gpio) in gpios.iter().enumerate() {
            if gpios[..i].contains(gpio) {
                return Err(ConfigError::Invalid("channel GPIOs must be distinct"));
            }
        }
        let channels = gpios.map(|gpio| Channel {
            state: ChannelState::default(),
            gpio,
        });
        Ok(Self { channels, pwm })
    }

    /// Set a channel's power and level and drive the matching duty.
    ///
    /// An out-of-range index is a caller bug: it is logged and ignored, with
    /// no state change and no hardware write.
    pub fn set_channel_power(&mut self, channel: u8, enabled: bool, level: Level) {
        let Some(index) = ChannelIndex::new(channel) else {
            warn!("Invalid PWM channel: {}", channel);
            return;
        };
        self.apply(index, ChannelState { enabled, level });
    }

    /// Store `state` for `index` and write its duty.
    pub fn apply(&mut self, index: ChannelIndex, state: ChannelState) {
        let ch = &mut self.channels[index.as_usize()];
        ch.state = state;
        let gpio = ch.gpio;
        let duty = state.duty();

        info!(
            "PWM {} (GPIO {}): {} level {}/254 ({:.1}%) duty {}/255 ({:.1}%)",
            index,
            gpio,
            if state.enabled { "ON" } else { "OFF" },
            state.level.get(),
            state.level.percent(),
            duty,
            duty::percent(duty),
        );

        if let Err(e) = self.pwm.set_duty(index, duty) {
            warn!("PWM {} (GPIO {}): duty write failed: {}", index, gpio, e);
        }
    }

    /// Write every channel's stored duty again.
    pub fn reassert_all(&mut self) {
        for index in ChannelIndex::all() {
            let state = self.channels[index.as_usize()].state;
            self.apply(index, state);
        }
    }

    pub fn state(&self, index: ChannelIndex) -> ChannelState {
        self.channels[index.as_usize()].state
    }

    pub fn states(&self) -> [ChannelState; CHANNEL_COUNT] {
        self.channels.map(|c| c.state)
    }

    pub fn gpio(&self, index: ChannelIndex) -> i32 {
        self.channels[index.as_usize()].gpio
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PwmError;

    #[derive(Default)]
    struct RecordingPwm {
        writes: Vec<(u8, u8)>,
        fail: bool,
    }

    impl PwmPort for RecordingPwm {
        fn set_duty(&mut self, channel: ChannelIndex, duty: u8) -> Result<(), PwmError> {
            self.writes.push((channel.get(), duty));
            if self.fail {
                Err(PwmError::UpdateDutyFailed(-1))
            } else {
                Ok(())
            }
        }
    }

    fn store() -> ChannelStore<RecordingPwm> {
        ChannelStore::new(RecordingPwm::default(), [4, 5, 6]).unwrap()
    }

    fn lvl(raw: u8) -> Level {
        Level::new(raw).unwrap()
    }

    #[test]
    fn starts_disabled_at_full_level_without_writing() {
        let s = store();
        assert!(s.states().iter().all(|st| *st == ChannelState::default()));
        assert!(s.pwm().writes.is_empty());
    }

    #[test]
    fn duplicate_gpio_rejected() {
        assert!(ChannelStore::new(RecordingPwm::default(), [4, 5, 4]).is_err());
    }

    #[test]
    fn enabled_channel_writes_mapped_duty() {
        let mut s = store();
        s.set_channel_power(2, true, lvl(127));
        assert_eq!(s.pwm().writes, [(2, 128)]);
        let idx = ChannelIndex::new(2).unwrap();
        assert_eq!(
            s.state(idx),
            ChannelState {
                enabled: true,
                level: lvl(127)
            }
        );
    }

    #[test]
    fn disabled_channel_writes_zero_but_keeps_level() {
        let mut s = store();
        s.set_channel_power(0, false, lvl(200));
        assert_eq!(s.pwm().writes, [(0, 0)]);
        assert_eq!(s.state(ChannelIndex::new(0).unwrap()).level, lvl(200));
    }

    #[test]
    fn invalid_index_is_a_no_op() {
        let mut s = store();
        s.set_channel_power(3, true, lvl(10));
        s.set_channel_power(255, true, lvl(10));
        assert!(s.pwm().writes.is_empty());
        assert!(s.states().iter().all(|st| *st == ChannelState::default()));
    }

    #[test]
    fn repeated_update_writes_every_time() {
        let mut s = store();
        s.set_channel_power(1, true, lvl(50));
        s.set_channel_power(1, true, lvl(50));
        assert_eq!(s.pwm().writes, [(1, 50), (1, 50)]);
    }

    #[test]
    fn failed_write_still_records_state() {
        let mut s = ChannelStore::new(
            RecordingPwm {
                fail: true,
                ..Default::default()
            },
            [4, 5, 6],
        )
        .unwrap();
        s.set_channel_power(0, true, lvl(254));
        assert!(s.state(ChannelIndex::new(0).unwrap()).enabled);
        assert_eq!(s.pwm().writes, [(0, 255)]);
    }

    #[test]
    fn reassert_all_writes_each_channel_in_order() {
        let mut s = store();
        s.set_channel_power(1, true, lvl(254));
        s.reassert_all();
        assert_eq!(s.pwm().writes, [(1, 255), (0, 0), (1, 255), (2, 0)]);
    }

    #[test]
    fn gpio_mapping_is_fixed() {
        let s = store();
        let gpios: Vec<i32> = ChannelIndex::all().map(|i| s.gpio(i)).collect();
        assert_eq!(gpios, [4, 5, 6]);
    }
}

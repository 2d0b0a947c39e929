//! LEDC PWM adapter: implements [`PwmPort`] for the three dimmer outputs.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: `ledc_set_duty` + `ledc_update_duty` on the channel that
//! `hw_init::init_ledc` configured.
//! On host/test: tracks the last duty per channel in memory only.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::app::ports::PwmPort;
use crate::channels::{CHANNEL_COUNT, ChannelIndex};
use crate::error::PwmError;
#[cfg(target_os = "espidf")]
use crate::pins;

/// Only construct after `hw_init::init_ledc` succeeded.
pub struct LedcPwm {
    duties: [u8; CHANNEL_COUNT],
}

impl Default for LedcPwm {
    fn default() -> Self {
        Self::new()
    }
}

impl LedcPwm {
    pub fn new() -> Self {
        Self {
            duties: [0; CHANNEL_COUNT],
        }
    }

    /// Last duty successfully latched on `channel`.
    pub fn duty(&self, channel: ChannelIndex) -> u8 {
        self.duties[channel.as_usize()]
    }
}

impl PwmPort for LedcPwm {
    #[cfg(target_os = "espidf")]
    fn set_duty(&mut self, channel: ChannelIndex, duty: u8) -> Result<(), PwmError> {
        let ledc_channel = pins::LEDC_CHANNELS[channel.as_usize()];
        // SAFETY: the channel was configured by init_ledc(); duty register
        // writes only happen from the control loop.
        let ret = unsafe { ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel, u32::from(duty)) };
        if ret != ESP_OK as i32 {
            return Err(PwmError::SetDutyFailed(ret));
        }
        let ret = unsafe { ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel) };
        if ret != ESP_OK as i32 {
            return Err(PwmError::UpdateDutyFailed(ret));
        }
        self.duties[channel.as_usize()] = duty;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn set_duty(&mut self, channel: ChannelIndex, duty: u8) -> Result<(), PwmError> {
        self.duties[channel.as_usize()] = duty;
        Ok(())
    }
}

//! One-shot LEDC initialisation.
//!
//! Configures the shared LEDC timer and the three dimmer channels using raw
//! ESP-IDF sys calls. Called once from `main()` before any duty is written.
//! Every channel starts at duty 0.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

use crate::config::DriverConfig;
use crate::error::HwInitError;
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_ledc(config: &DriverConfig) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop starts;
    // single-threaded.
    unsafe {
        init_ledc_timer(config)?;
        init_ledc_channels()?;
    }
    info!(
        "hw_init: LEDC configured ({} Hz, {}-bit, channels {:?} on GPIO {:?})",
        config.pwm_frequency_hz,
        config.pwm_resolution_bits,
        pins::LEDC_CHANNELS,
        pins::PWM_GPIOS
    );
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_ledc(config: &DriverConfig) -> Result<(), HwInitError> {
    info!(
        "hw_init(sim): LEDC init skipped ({} Hz, GPIO {:?})",
        config.pwm_frequency_hz,
        pins::PWM_GPIOS
    );
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_ledc_timer(config: &DriverConfig) -> Result<(), HwInitError> {
    let timer = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: pins::LEDC_TIMER,
        duty_resolution: u32::from(config.pwm_resolution_bits),
        freq_hz: config.pwm_frequency_hz,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::LedcTimerFailed(ret));
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_ledc_channels() -> Result<(), HwInitError> {
    for (i, (&channel, &gpio)) in pins::LEDC_CHANNELS.iter().zip(&pins::PWM_GPIOS).enumerate() {
        let cfg = ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            timer_sel: pins::LEDC_TIMER,
            gpio_num: gpio,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        let ret = unsafe { ledc_channel_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::LedcChannelFailed {
                channel: i as u8,
                rc: ret,
            });
        }
        info!("hw_init: {} -> LEDC channel {}", pins::CHANNEL_NAMES[i], channel);
    }
    Ok(())
}

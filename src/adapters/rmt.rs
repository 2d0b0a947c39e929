//! RMT transmit adapter: implements [`LedTxPort`] for the status LED.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: one RMT TX channel plus a copy encoder, created and enabled
//! once in [`RmtStatusLed::new`]. The symbol words handed to
//! `rmt_transmit` live in a heap buffer owned by the adapter, which stays
//! put until the frame has been waited for.
//! On host/test: records submitted frames in memory only.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

use crate::app::ports::LedTxPort;
use crate::config::DriverConfig;
use crate::error::{HwInitError, TxError};
use crate::status::encoder::{MAX_FRAME_SYMBOLS, Symbol};

pub struct RmtStatusLed {
    gpio: i32,
    frames_submitted: u32,
    /// Raw words of the last submitted frame.
    last_frame: heapless::Vec<u32, MAX_FRAME_SYMBOLS>,
    #[cfg(target_os = "espidf")]
    channel: rmt_channel_handle_t,
    #[cfg(target_os = "espidf")]
    encoder: rmt_encoder_handle_t,
    #[cfg(target_os = "espidf")]
    words: Box<[rmt_symbol_word_t; MAX_FRAME_SYMBOLS]>,
}

impl RmtStatusLed {
    /// Create and enable the TX channel on `gpio`.
    #[cfg(target_os = "espidf")]
    pub fn new(gpio: i32, config: &DriverConfig) -> Result<Self, HwInitError> {
        let tx_cfg = rmt_tx_channel_config_t {
            gpio_num: gpio,
            clk_src: soc_periph_rmt_clk_src_t_RMT_CLK_SRC_DEFAULT,
            resolution_hz: config.status_resolution_hz,
            mem_block_symbols: config.status_mem_block_symbols,
            trans_queue_depth: config.status_queue_depth,
            ..Default::default()
        };
        let mut channel: rmt_channel_handle_t = core::ptr::null_mut();
        // SAFETY: valid config and out-pointer; called once from main().
        let ret = unsafe { rmt_new_tx_channel(&tx_cfg, &mut channel) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::RmtChannelFailed(ret));
        }

        let enc_cfg = rmt_copy_encoder_config_t::default();
        let mut encoder: rmt_encoder_handle_t = core::ptr::null_mut();
        let ret = unsafe { rmt_new_copy_encoder(&enc_cfg, &mut encoder) };
        if ret != ESP_OK as i32 {
            unsafe { rmt_del_channel(channel) };
            return Err(HwInitError::RmtEncoderFailed(ret));
        }

        let ret = unsafe { rmt_enable(channel) };
        if ret != ESP_OK as i32 {
            unsafe {
                rmt_del_encoder(encoder);
                rmt_del_channel(channel);
            }
            return Err(HwInitError::RmtEnableFailed(ret));
        }

        info!(
            "RMT: status LED on GPIO {} ({} Hz, {} symbols, queue {})",
            gpio, config.status_resolution_hz, config.status_mem_block_symbols, config.status_queue_depth
        );
        Ok(Self {
            gpio,
            frames_submitted: 0,
            last_frame: heapless::Vec::new(),
            channel,
            encoder,
            words: Box::new([rmt_symbol_word_t { val: 0 }; MAX_FRAME_SYMBOLS]),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new(gpio: i32, config: &DriverConfig) -> Result<Self, HwInitError> {
        log::info!(
            "RMT(sim): status LED on GPIO {} ({} Hz)",
            gpio,
            config.status_resolution_hz
        );
        Ok(Self {
            gpio,
            frames_submitted: 0,
            last_frame: heapless::Vec::new(),
        })
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    pub fn frames_submitted(&self) -> u32 {
        self.frames_submitted
    }

    pub fn last_frame(&self) -> &[u32] {
        &self.last_frame
    }

    fn record(&mut self, symbols: &[Symbol]) -> Result<(), TxError> {
        self.last_frame.clear();
        for s in symbols {
            self.last_frame.push(s.to_word()).map_err(|_| TxError::Driver(-1))?;
        }
        self.frames_submitted += 1;
        Ok(())
    }
}

impl LedTxPort for RmtStatusLed {
    #[cfg(target_os = "espidf")]
    fn transmit(&mut self, symbols: &[Symbol]) -> Result<(), TxError> {
        if symbols.len() > MAX_FRAME_SYMBOLS {
            return Err(TxError::Driver(ESP_ERR_INVALID_SIZE as i32));
        }
        for (word, s) in self.words.iter_mut().zip(symbols) {
            *word = rmt_symbol_word_t { val: s.to_word() };
        }
        let tx_cfg = rmt_transmit_config_t {
            loop_count: 0,
            ..Default::default()
        };
        // SAFETY: `words` is heap-allocated and owned by self; the caller
        // waits for completion before the next transmit overwrites it.
        let ret = unsafe {
            rmt_transmit(
                self.channel,
                self.encoder,
                self.words.as_ptr().cast(),
                symbols.len() * core::mem::size_of::<rmt_symbol_word_t>(),
                &tx_cfg,
            )
        };
        if ret != ESP_OK as i32 {
            return Err(TxError::Driver(ret));
        }
        self.record(symbols)
    }

    #[cfg(not(target_os = "espidf"))]
    fn transmit(&mut self, symbols: &[Symbol]) -> Result<(), TxError> {
        self.record(symbols)
    }

    #[cfg(target_os = "espidf")]
    fn wait_all_done(&mut self, timeout_ms: u32) -> Result<(), TxError> {
        // SAFETY: channel handle is valid for the adapter's lifetime.
        let ret = unsafe { rmt_tx_wait_all_done(self.channel, timeout_ms as i32) };
        if ret == ESP_OK as i32 {
            Ok(())
        } else if ret == ESP_ERR_TIMEOUT as i32 {
            Err(TxError::Timeout)
        } else {
            Err(TxError::Driver(ret))
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn wait_all_done(&mut self, _timeout_ms: u32) -> Result<(), TxError> {
        Ok(())
    }
}

//! Unified error types for the dimmer firmware.
//!
//! A single `Error` enum that every subsystem can convert into, so the
//! composition root and `main` handle failures uniformly. All variants are
//! `Copy`; none of them allocate.
//!
//! Most of these never cross the core boundary as a `Result`: the channel
//! store and the status transmitter log and swallow them. They exist so the
//! ports can report *what* went wrong and the log line can say so.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A PWM duty write failed.
    Pwm(PwmError),
    /// The status LED transmit path failed.
    Tx(TxError),
    /// The signal encoder could not be configured or a frame did not fit.
    Encode(EncodeError),
    /// Endpoint binding could not be built.
    Binding(BindingError),
    /// Configuration is invalid.
    Config(ConfigError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pwm(e) => write!(f, "pwm: {e}"),
            Self::Tx(e) => write!(f, "status tx: {e}"),
            Self::Encode(e) => write!(f, "encoder: {e}"),
            Self::Binding(e) => write!(f, "binding: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// PWM
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    /// `ledc_set_duty` returned an error code.
    SetDutyFailed(i32),
    /// `ledc_update_duty` returned an error code.
    UpdateDutyFailed(i32),
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetDutyFailed(rc) => write!(f, "set duty failed (rc={rc})"),
            Self::UpdateDutyFailed(rc) => write!(f, "update duty failed (rc={rc})"),
        }
    }
}

impl From<PwmError> for Error {
    fn from(e: PwmError) -> Self {
        Self::Pwm(e)
    }
}

// ---------------------------------------------------------------------------
// Status LED transmit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxError {
    /// The line is still clocking out a previous frame.
    Busy,
    /// Completion was not reported within the timeout.
    Timeout,
    /// The subsystem failed at creation and is permanently disabled.
    Disabled,
    /// Any other driver error code.
    Driver(i32),
}

impl fmt::Display for TxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "line busy"),
            Self::Timeout => write!(f, "timed out waiting for frame completion"),
            Self::Disabled => write!(f, "subsystem disabled"),
            Self::Driver(rc) => write!(f, "driver error (rc={rc})"),
        }
    }
}

impl From<TxError> for Error {
    fn from(e: TxError) -> Self {
        Self::Tx(e)
    }
}

// ---------------------------------------------------------------------------
// Signal encoder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// A pulse duration rounds to zero ticks at the channel resolution.
    DurationTooShort { nanos: u32 },
    /// A pulse duration does not fit the 15-bit symbol field.
    DurationTooLong { nanos: u32 },
    /// The frame needs more symbols than one transmit buffer holds.
    FrameTooLong { bytes: usize },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DurationTooShort { nanos } => {
                write!(f, "{nanos} ns rounds to zero ticks")
            }
            Self::DurationTooLong { nanos } => {
                write!(f, "{nanos} ns exceeds the 15-bit tick field")
            }
            Self::FrameTooLong { bytes } => {
                write!(f, "{bytes}-byte frame exceeds the symbol buffer")
            }
        }
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

// ---------------------------------------------------------------------------
// Endpoint binding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingError {
    /// Two channels were assigned the same endpoint id.
    DuplicateEndpoint(u16),
    /// The binding was already built for this process.
    AlreadyBound,
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEndpoint(id) => write!(f, "endpoint {id} assigned twice"),
            Self::AlreadyBound => write!(f, "endpoints already bound"),
        }
    }
}

impl From<BindingError> for Error {
    fn from(e: BindingError) -> Self {
        Self::Binding(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A config field failed validation. The message names the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(&'static str),
    /// The JSON override could not be parsed.
    Malformed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(msg) => write!(f, "invalid: {msg}"),
            Self::Malformed => write!(f, "malformed JSON override"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Peripheral initialisation
// ---------------------------------------------------------------------------

/// Errors during one-shot peripheral initialization. Carries the raw
/// `esp_err_t` where there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    LedcTimerFailed(i32),
    LedcChannelFailed { channel: u8, rc: i32 },
    RmtChannelFailed(i32),
    RmtEncoderFailed(i32),
    RmtEnableFailed(i32),
}

impl fmt::Display for HwInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LedcTimerFailed(rc) => write!(f, "LEDC timer config failed (rc={rc})"),
            Self::LedcChannelFailed { channel, rc } => {
                write!(f, "LEDC channel {channel} config failed (rc={rc})")
            }
            Self::RmtChannelFailed(rc) => write!(f, "RMT TX channel create failed (rc={rc})"),
            Self::RmtEncoderFailed(rc) => write!(f, "RMT encoder create failed (rc={rc})"),
            Self::RmtEnableFailed(rc) => write!(f, "RMT channel enable failed (rc={rc})"),
        }
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

//! Integration tests for the status LED path: colour → wire order →
//! encoder → transmitter → line.

use super::mock_hw::{LineCall, MockLedTx};

use dimmer::config::{BitOrder, BitTimingNs, ColourOrder, DriverConfig};
use dimmer::error::HwInitError;
use dimmer::status::StatusIndicator;
use dimmer::status::encoder::{BitTiming, BytesEncoder, Symbol};
use dimmer::status::transmitter::TxState;

fn encoder() -> BytesEncoder {
    let timing = BitTiming::from_ns(&BitTimingNs::default(), 10_000_000).unwrap();
    BytesEncoder::new(timing, BitOrder::MsbFirst)
}

fn indicator(line: MockLedTx) -> StatusIndicator<MockLedTx> {
    let config = DriverConfig::default();
    let mut led = StatusIndicator::new(config.status_colour_order, config.status_tx_timeout_ms);
    led.init(Ok(line), Ok(encoder())).unwrap();
    led
}

/// Read bytes back off the line: a long high pulse is a `1`.
fn decode(symbols: &[Symbol]) -> Vec<u8> {
    symbols
        .chunks(8)
        .map(|bits| {
            bits.iter()
                .fold(0u8, |acc, s| (acc << 1) | u8::from(s.duration0 > s.duration1))
        })
        .collect()
}

#[test]
fn colour_goes_out_green_first() {
    let mut led = indicator(MockLedTx::new());
    assert!(led.transmit_status_color(0x12, 0x34, 0x56));
    let port = led.port().unwrap();
    assert_eq!(decode(port.frames()[0]), [0x34, 0x12, 0x56]);
    assert_eq!(led.state(), TxState::Ready);
}

#[test]
fn rgb_wire_order_is_configurable() {
    let mut led = StatusIndicator::new(ColourOrder::Rgb, 100);
    led.init(Ok(MockLedTx::new()), Ok(encoder())).unwrap();
    led.transmit_status_color(1, 2, 3);
    assert_eq!(decode(led.port().unwrap().frames()[0]), [1, 2, 3]);
}

#[test]
fn back_to_back_frames_never_overlap() {
    let mut led = indicator(MockLedTx::with_busy_waits(1));

    // First frame times out on its wait; the second must drain the line
    // before going out.
    assert!(!led.transmit_status_color(255, 0, 0));
    led.transmit_status_color(0, 0, 255);

    let port = led.port().unwrap();
    assert!(!port.overlapped);
    assert_eq!(port.frames().len(), 2);
    assert!(matches!(
        port.calls.as_slice(),
        [LineCall::Transmit(_), LineCall::Wait, LineCall::Wait, LineCall::Transmit(_), LineCall::Wait]
    ));
}

#[test]
fn stuck_line_rejects_new_frame() {
    let mut led = indicator(MockLedTx::with_busy_waits(10));
    assert!(!led.transmit_status_color(255, 0, 0));
    assert!(!led.transmit_status_color(0, 255, 0));

    let port = led.port().unwrap();
    assert_eq!(port.frames().len(), 1);
    assert!(!port.overlapped);
    assert_eq!(led.state(), TxState::Ready);
    assert_eq!(led.stats().timeouts, 1);
}

#[test]
fn failed_channel_never_transmits() {
    let mut led: StatusIndicator<MockLedTx> = StatusIndicator::new(ColourOrder::Grb, 100);
    assert!(led.init(Err(HwInitError::RmtEnableFailed(-1)), Ok(encoder())).is_err());
    assert_eq!(led.state(), TxState::Failed);
    assert!(!led.transmit_status_color(1, 1, 1));
    assert!(led.port().is_none());
}

#[test]
fn driver_rejection_is_not_retried() {
    let mut line = MockLedTx::new();
    line.reject_transmit = true;
    let mut led = indicator(line);
    assert!(!led.transmit_status_color(9, 9, 9));
    assert!(led.port().unwrap().calls.is_empty());
    assert_eq!(led.stats().failures, 1);
}

//! Fuzz target: `BitTiming::from_ns` + `BytesEncoder::encode`
//!
//! The first 12 bytes pick a tick rate and four pulse durations; the rest
//! is the frame. Asserts that timing conversion either fails cleanly or
//! yields non-zero 15-bit durations, and that every encoded symbol is one
//! of the two configured pulses.
//!
//! cargo fuzz run fuzz_signal_encoder

#![no_main]

use dimmer::config::{BitOrder, BitTimingNs};
use dimmer::status::encoder::{BitTiming, BytesEncoder, MAX_FRAME_BYTES, Symbol, SymbolBuf};
use libfuzzer_sys::fuzz_target;

fn word(data: &[u8], at: usize) -> u32 {
    u32::from(u16::from_le_bytes([data[at], data[at + 1]]))
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 12 {
        return;
    }
    let resolution_hz = u32::from_le_bytes([data[0], data[1], data[2], data[3]]).max(1);
    let ns = BitTimingNs {
        t0_high_ns: word(data, 4),
        t0_low_ns: word(data, 6),
        t1_high_ns: word(data, 8),
        t1_low_ns: word(data, 10),
    };
    let Ok(timing) = BitTiming::from_ns(&ns, resolution_hz) else {
        return;
    };
    for s in [timing.bit0, timing.bit1] {
        assert!(s.duration0 > 0 && s.duration0 <= Symbol::MAX_DURATION);
        assert!(s.duration1 > 0 && s.duration1 <= Symbol::MAX_DURATION);
    }

    let order = if resolution_hz & 1 == 0 { BitOrder::MsbFirst } else { BitOrder::LsbFirst };
    let encoder = BytesEncoder::new(timing, order);
    let frame = &data[12..];
    let mut out = SymbolBuf::new();
    match encoder.encode(frame, &mut out) {
        Ok(()) => {
            assert_eq!(out.len(), frame.len() * 8);
            assert!(out.iter().all(|s| *s == timing.bit0 || *s == timing.bit1));
        }
        Err(_) => {
            assert!(frame.len() > MAX_FRAME_BYTES);
            assert!(out.is_empty());
        }
    }
});

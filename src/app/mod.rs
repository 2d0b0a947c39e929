//! Application core: pure domain wiring, zero I/O.
//!
//! All interaction with hardware happens through the **port traits** in
//! [`ports`], which keeps the channel store, the router and the status
//! transmitter testable without real peripherals. [`service`] holds the
//! composition root that owns all of them.

pub mod ports;
pub mod service;

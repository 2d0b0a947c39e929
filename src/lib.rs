//! Three-channel dimmer firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod channels;
pub mod config;
pub mod error;
pub mod events;
pub mod pins;
pub mod status;

// The ESP-IDF paths are cfg-gated inside; on host they fall back to
// in-memory simulation so the crate builds and tests everywhere.
pub mod adapters;
pub mod drivers;

mod esp_link_shims;

//! Peripheral initialisation and supervision.

pub mod hw_init;
pub mod watchdog;

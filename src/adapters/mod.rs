//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter  | Implements  | Connects to                 |
//! |----------|-------------|-----------------------------|
//! | `ledc`   | PwmPort     | ESP32 LEDC, three channels  |
//! | `rmt`    | LedTxPort   | ESP32 RMT TX + copy encoder |
//! | `delay`  | DelayNs     | FreeRTOS / thread sleep     |

pub mod delay;
pub mod ledc;
pub mod rmt;

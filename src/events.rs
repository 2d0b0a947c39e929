//! Attribute event handoff.
//!
//! The control layer reports attribute changes from its own task. Those
//! events are queued here and consumed by the firmware control loop, which
//! is the only context allowed to touch the channel store or the PWM
//! peripheral.
//!
//! ```text
//! ┌───────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Control layer │────▶│ Attribute    │────▶│ Control loop │
//! │ callbacks     │     │ queue (16)   │     │ (consumer)   │
//! └───────────────┘     └──────────────┘     └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::channels::router::AttributeEvent;

/// Maximum number of pending attribute events.
pub const ATTRIBUTE_QUEUE_CAP: usize = 16;

static ATTRIBUTE_EVENTS: Channel<CriticalSectionRawMutex, AttributeEvent, ATTRIBUTE_QUEUE_CAP> =
    Channel::new();

/// Queue an event for the control loop. Never blocks.
/// Returns `false` if the queue is full (event dropped).
pub fn push_attribute_event(event: AttributeEvent) -> bool {
    ATTRIBUTE_EVENTS.try_send(event).is_ok()
}

/// Hand every pending event to `handler`, oldest first. Returns how many
/// were handled.
pub fn drain_attribute_events(mut handler: impl FnMut(AttributeEvent)) -> usize {
    let mut handled = 0;
    while let Ok(event) = ATTRIBUTE_EVENTS.try_receive() {
        handler(event);
        handled += 1;
    }
    handled
}

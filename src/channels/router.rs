//! Endpoint dispatch.
//!
//! The control layer addresses outputs by endpoint id. [`EndpointBinding`]
//! maps those ids onto channel indices (built once at startup, read-only
//! afterwards) and [`DispatchRouter`] turns an attribute change on an
//! endpoint into a store update.
//!
//! Events for endpoints this controller does not own are normal traffic and
//! are dropped without a warning.

use log::{debug, error, info, warn};

use super::store::ChannelStore;
use super::{CHANNEL_COUNT, ChannelIndex, ChannelState, Level};
use crate::app::ports::PwmPort;
use crate::error::BindingError;
use crate::pins;

/// Opaque endpoint identifier issued by the control layer.
pub type EndpointId = u16;

/// Attribute change on one endpoint, already decoded from raw cluster and
/// attribute identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// On/off.
    Power(bool),
    /// Current level, `0..=254` from a well-behaved producer.
    Level(u8),
}

/// An attribute change addressed to an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeEvent {
    pub endpoint: EndpointId,
    pub attribute: Attribute,
}

impl AttributeEvent {
    pub const fn power(endpoint: EndpointId, on: bool) -> Self {
        Self {
            endpoint,
            attribute: Attribute::Power(on),
        }
    }

    pub const fn level(endpoint: EndpointId, level: u8) -> Self {
        Self {
            endpoint,
            attribute: Attribute::Level(level),
        }
    }
}

/// What happened to an event. Informational; none of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The channel was updated and its duty written.
    Applied(ChannelIndex),
    /// The endpoint does not belong to this controller.
    Unbound,
    /// The value could not be a level; nothing changed.
    Rejected,
}

// ───────────────────────────────────────────────────────────────
// EndpointBinding
// ───────────────────────────────────────────────────────────────

/// Bijective endpoint id ↔ channel mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointBinding {
    endpoints: [Option<EndpointId>; CHANNEL_COUNT],
}

impl EndpointBinding {
    /// Build from the ids the control layer assigned, in channel order.
    ///
    /// `None` means endpoint creation failed for that channel; it stays
    /// unbound. A repeated id would make the mapping ambiguous and is
    /// rejected.
    pub fn from_assigned(
        assigned: [Option<EndpointId>; CHANNEL_COUNT],
    ) -> Result<Self, BindingError> {
        for (i, id) in assigned.iter().enumerate() {
            let Some(id) = id else { continue };
            if assigned[..i].contains(&Some(*id)) {
                return Err(BindingError::DuplicateEndpoint(*id));
            }
        }

        for (index, id) in ChannelIndex::all().zip(assigned) {
            let name = pins::CHANNEL_NAMES[index.as_usize()];
            match id {
                Some(id) => info!("Bound endpoint {} to {} ({})", id, index, name),
                None => error!("No endpoint for {} ({}); channel unbound", index, name),
            }
        }

        Ok(Self {
            endpoints: assigned,
        })
    }

    pub fn resolve(&self, endpoint: EndpointId) -> Option<ChannelIndex> {
        ChannelIndex::all().find(|i| self.endpoints[i.as_usize()] == Some(endpoint))
    }

    pub fn endpoint_for(&self, index: ChannelIndex) -> Option<EndpointId> {
        self.endpoints[index.as_usize()]
    }
}

// ───────────────────────────────────────────────────────────────
// DispatchRouter
// ───────────────────────────────────────────────────────────────

pub struct DispatchRouter {
    binding: EndpointBinding,
}

impl DispatchRouter {
    pub fn new(binding: EndpointBinding) -> Self {
        Self { binding }
    }

    pub fn binding(&self) -> &EndpointBinding {
        &self.binding
    }

    /// Apply one attribute change.
    ///
    /// Power keeps the stored level and Level keeps the stored power flag.
    /// Either way the duty is written again, so duplicate events are safe and
    /// re-assert the output.
    pub fn on_endpoint_event<P: PwmPort>(
        &self,
        store: &mut ChannelStore<P>,
        event: AttributeEvent,
    ) -> Dispatch {
        let Some(index) = self.binding.resolve(event.endpoint) else {
            debug!("Endpoint {} not bound here, ignoring", event.endpoint);
            return Dispatch::Unbound;
        };

        let current = store.state(index);
        let next = match event.attribute {
            Attribute::Power(on) => {
                info!("{} (GPIO {}): POWER {}", index, store.gpio(index), if on { "ON" } else { "OFF" });
                ChannelState {
                    enabled: on,
                    ..current
                }
            }
            Attribute::Level(raw) => {
                let Some(level) = Level::new(raw) else {
                    warn!("{} (GPIO {}): level {} out of range, ignoring", index, store.gpio(index), raw);
                    return Dispatch::Rejected;
                };
                info!(
                    "{} (GPIO {}): LEVEL {}/254 ({:.1}%)",
                    index,
                    store.gpio(index),
                    level.get(),
                    level.percent()
                );
                ChannelState { level, ..current }
            }
        };

        store.apply(index, next);
        Dispatch::Applied(index)
    }
}

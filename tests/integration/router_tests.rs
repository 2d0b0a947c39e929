//! Integration tests for endpoint binding and dispatch against the real
//! channel store.

use super::mock_hw::MockPwm;

use dimmer::channels::router::{AttributeEvent, Dispatch, DispatchRouter, EndpointBinding};
use dimmer::channels::store::ChannelStore;
use dimmer::channels::{ChannelIndex, ChannelState, Level};
use dimmer::error::BindingError;
use dimmer::pins;

fn setup(assigned: [Option<u16>; 3]) -> (DispatchRouter, ChannelStore<MockPwm>) {
    let router = DispatchRouter::new(EndpointBinding::from_assigned(assigned).unwrap());
    let store = ChannelStore::new(MockPwm::new(), pins::PWM_GPIOS).unwrap();
    (router, store)
}

#[test]
fn root_endpoint_never_reaches_a_channel() {
    let (router, mut store) = setup([Some(1), Some(2), Some(3)]);
    assert_eq!(router.on_endpoint_event(&mut store, AttributeEvent::power(0, true)), Dispatch::Unbound);
    assert!(store.pwm().writes.is_empty());
}

#[test]
fn non_contiguous_endpoint_ids() {
    let (router, mut store) = setup([Some(7), Some(12), Some(40)]);
    assert_eq!(
        router.on_endpoint_event(&mut store, AttributeEvent::level(40, 254)),
        Dispatch::Applied(ChannelIndex::new(2).unwrap())
    );
    assert_eq!(router.on_endpoint_event(&mut store, AttributeEvent::level(8, 1)), Dispatch::Unbound);
    assert_eq!(store.pwm().writes, [(2, 0)]);
}

#[test]
fn ambiguous_binding_is_refused() {
    assert_eq!(
        EndpointBinding::from_assigned([Some(5), Some(5), None]),
        Err(BindingError::DuplicateEndpoint(5))
    );
}

#[test]
fn unbound_channels_do_not_alias_each_other() {
    let b = EndpointBinding::from_assigned([None, None, Some(9)]).unwrap();
    assert_eq!(b.resolve(9), ChannelIndex::new(2));
    assert_eq!(b.endpoint_for(ChannelIndex::new(0).unwrap()), None);
    assert_eq!(b.endpoint_for(ChannelIndex::new(1).unwrap()), None);
}

#[test]
fn events_only_touch_their_own_channel() {
    let (router, mut store) = setup([Some(1), Some(2), Some(3)]);
    router.on_endpoint_event(&mut store, AttributeEvent::power(1, true));
    router.on_endpoint_event(&mut store, AttributeEvent::level(1, 30));

    assert_eq!(
        store.state(ChannelIndex::new(0).unwrap()),
        ChannelState {
            enabled: true,
            level: Level::new(30).unwrap()
        }
    );
    assert!(store.pwm().writes.iter().all(|(c, _)| *c == 0));
    assert_eq!(store.state(ChannelIndex::new(1).unwrap()), ChannelState::default());
    assert_eq!(store.state(ChannelIndex::new(2).unwrap()), ChannelState::default());
}

#[test]
fn null_level_leaves_output_alone() {
    let (router, mut store) = setup([Some(1), Some(2), Some(3)]);
    router.on_endpoint_event(&mut store, AttributeEvent::level(3, 100));
    assert_eq!(router.on_endpoint_event(&mut store, AttributeEvent::level(3, 255)), Dispatch::Rejected);
    assert_eq!(store.state(ChannelIndex::new(2).unwrap()).level.get(), 100);
    assert_eq!(store.pwm().writes.len(), 1);
}

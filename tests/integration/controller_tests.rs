//! Integration tests for the Controller → router → store → PWM pipeline.
//!
//! Run on the host against recording mocks and verify the full dispatch
//! chain from an attribute event down to a duty write.

use super::mock_hw::{MockDelay, MockLedTx, MockPwm};

use dimmer::app::service::Controller;
use dimmer::channels::router::{AttributeEvent, Dispatch};
use dimmer::channels::{ChannelIndex, ChannelState, Level, duty};
use dimmer::config::DriverConfig;
use dimmer::error::{HwInitError, PwmError};
use dimmer::events;
use dimmer::status::transmitter::TxState;

fn make_controller() -> Controller<MockPwm, MockLedTx> {
    let mut c = Controller::init(
        DriverConfig::default(),
        MockPwm::new(),
        Ok(MockLedTx::new()),
        &mut MockDelay::default(),
    )
    .unwrap();
    c.bind_endpoints([Some(1), Some(2), Some(3)]).unwrap();
    c
}

fn ch(raw: u8) -> ChannelIndex {
    ChannelIndex::new(raw).unwrap()
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn init_drives_all_outputs_to_zero() {
    let c = make_controller();
    assert_eq!(c.pwm().writes, [(0, 0), (1, 0), (2, 0)]);
    for s in c.channel_states() {
        assert_eq!(s, ChannelState::default());
    }
}

#[test]
fn startup_blink_waits_configured_hold() {
    let mut delay = MockDelay::default();
    let c = Controller::init(DriverConfig::default(), MockPwm::new(), Ok(MockLedTx::new()), &mut delay)
        .unwrap();
    assert_eq!(delay.total_ns, 300_000_000);
    assert_eq!(c.status_port().unwrap().frames().len(), 2);
}

#[test]
fn status_led_failure_does_not_affect_pwm() {
    let mut delay = MockDelay::default();
    let mut c = Controller::<MockPwm, MockLedTx>::init(
        DriverConfig::default(),
        MockPwm::new(),
        Err(HwInitError::RmtChannelFailed(-1)),
        &mut delay,
    )
    .unwrap();
    assert_eq!(c.status_state(), TxState::Failed);
    assert_eq!(delay.total_ns, 0, "no blink on a failed status LED");
    assert!(!c.transmit_status_color(255, 0, 0));

    c.bind_endpoints([Some(1), Some(2), Some(3)]).unwrap();
    assert_eq!(c.on_endpoint_event(AttributeEvent::power(1, true)), Dispatch::Applied(ch(0)));
    assert_eq!(c.pwm().last_duty(0), Some(255));
}

#[test]
fn zero_blink_duration_skips_blink() {
    let config = DriverConfig {
        startup_blink_ms: 0,
        ..Default::default()
    };
    let c = Controller::init(config, MockPwm::new(), Ok(MockLedTx::new()), &mut MockDelay::default())
        .unwrap();
    assert!(c.status_port().unwrap().frames().is_empty());
}

// ── End-to-end dispatch ───────────────────────────────────────

#[test]
fn power_then_level_on_second_endpoint() {
    let mut c = make_controller();

    c.on_endpoint_event(AttributeEvent::power(2, true));
    c.on_endpoint_event(AttributeEvent::level(2, 127));

    assert_eq!(
        c.channel_state(ch(1)),
        ChannelState {
            enabled: true,
            level: Level::new(127).unwrap()
        }
    );
    assert_eq!(c.pwm().last_duty(1), Some(duty::map(Level::new(127).unwrap())));
    // Only the init writes touched channels 0 and 2.
    assert_eq!(c.pwm().writes_to(0), [0]);
    assert_eq!(c.pwm().writes_to(2), [0]);
}

#[test]
fn power_off_keeps_level_for_next_power_on() {
    let mut c = make_controller();
    c.on_endpoint_event(AttributeEvent::level(3, 60));
    c.on_endpoint_event(AttributeEvent::power(3, true));
    c.on_endpoint_event(AttributeEvent::power(3, false));
    c.on_endpoint_event(AttributeEvent::power(3, true));
    assert_eq!(c.pwm().writes_to(2), [0, 0, 60, 0, 60]);
}

#[test]
fn direct_control_bypasses_binding() {
    let mut c = Controller::init(
        DriverConfig::default(),
        MockPwm::new(),
        Ok(MockLedTx::new()),
        &mut MockDelay::default(),
    )
    .unwrap();
    c.bind_endpoints([Some(1), None, Some(3)]).unwrap();

    // Endpoint 2 is unknown, but channel 1 can still be driven directly.
    assert_eq!(c.on_endpoint_event(AttributeEvent::power(2, true)), Dispatch::Unbound);
    c.set_channel_power(1, true, Level::MAX);
    assert_eq!(c.pwm().last_duty(1), Some(255));
}

#[test]
fn invalid_channel_index_changes_nothing() {
    let mut c = make_controller();
    let before = c.channel_states();
    c.set_channel_power(3, true, Level::new(100).unwrap());
    assert_eq!(c.channel_states(), before);
    assert_eq!(c.pwm().writes.len(), 3);
}

#[test]
fn pwm_failure_is_swallowed() {
    let failing = MockPwm {
        fail: Some(PwmError::UpdateDutyFailed(-1)),
        ..MockPwm::default()
    };
    let mut c = Controller::init(
        DriverConfig::default(),
        failing,
        Ok(MockLedTx::new()),
        &mut MockDelay::default(),
    )
    .unwrap();
    c.bind_endpoints([Some(1), Some(2), Some(3)]).unwrap();

    assert_eq!(c.on_endpoint_event(AttributeEvent::power(1, true)), Dispatch::Applied(ch(0)));
    // State still reflects the request; the next write re-asserts it.
    assert!(c.channel_state(ch(0)).enabled);
    assert_eq!(c.pwm().writes.len(), 4);
}

// ── Event queue handoff ───────────────────────────────────────

#[test]
fn queued_events_reach_the_store_in_order() {
    let mut c = make_controller();
    events::drain_attribute_events(|_| {});

    let producer = std::thread::spawn(|| {
        assert!(events::push_attribute_event(AttributeEvent::power(1, true)));
        assert!(events::push_attribute_event(AttributeEvent::level(1, 10)));
        assert!(events::push_attribute_event(AttributeEvent::level(1, 200)));
    });
    producer.join().unwrap();

    let n = events::drain_attribute_events(|ev| {
        c.on_endpoint_event(ev);
    });
    assert_eq!(n, 3);
    assert_eq!(c.pwm().writes_to(0), [0, 255, 10, duty::map(Level::new(200).unwrap())]);
}

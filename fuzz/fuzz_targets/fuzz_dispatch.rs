//! Fuzz target: `DispatchRouter::on_endpoint_event`
//!
//! Replays arbitrary attribute events (3 bytes each: endpoint, kind,
//! value) against a bound router and checks after every event that each
//! channel's last duty write matches its stored state.
//!
//! cargo fuzz run fuzz_dispatch

#![no_main]

use dimmer::app::ports::PwmPort;
use dimmer::channels::router::{AttributeEvent, Dispatch, DispatchRouter, EndpointBinding};
use dimmer::channels::store::ChannelStore;
use dimmer::channels::{CHANNEL_COUNT, ChannelIndex};
use dimmer::error::PwmError;
use libfuzzer_sys::fuzz_target;

struct LastDuty([Option<u8>; CHANNEL_COUNT]);

impl PwmPort for LastDuty {
    fn set_duty(&mut self, channel: ChannelIndex, duty: u8) -> Result<(), PwmError> {
        self.0[channel.get() as usize] = Some(duty);
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(binding) = EndpointBinding::from_assigned([Some(1), Some(2), Some(3)]) else {
        return;
    };
    let router = DispatchRouter::new(binding);
    let Ok(mut store) = ChannelStore::new(LastDuty([None; CHANNEL_COUNT]), [4, 5, 6]) else {
        return;
    };

    for ev in data.chunks_exact(3) {
        let endpoint = u16::from(ev[0] % 6);
        let event = if ev[1] & 1 == 0 {
            AttributeEvent::power(endpoint, ev[2] & 1 == 1)
        } else {
            AttributeEvent::level(endpoint, ev[2])
        };
        match router.on_endpoint_event(&mut store, event) {
            Dispatch::Applied(index) => {
                assert_eq!(store.pwm().0[index.get() as usize], Some(store.state(index).duty()));
            }
            Dispatch::Unbound => assert!(!(1..=3).contains(&endpoint)),
            Dispatch::Rejected => assert_eq!(ev[2], 255),
        }
    }
});

use std::time::Duration;

use libaime::config::ChipConfig;
use libaime::constants::{PN532_ACK, PN532_NACK};
use libaime::device::{Pn532, Pn532Builder};
use libaime::test_support::seed_exchange;
use libaime::transport::{MockClock, MockTransport};
use libaime::utils::RetryPolicy;
use libaime::Error;

use crate::common::fixtures;

fn chip(bus: &MockTransport, clock: &MockClock) -> Pn532 {
    Pn532Builder::new()
        .with_transport(Box::new(bus.clone()))
        .with_clock(Box::new(clock.clone()))
        .build()
        .expect("transport provided")
}

#[test]
fn full_conversation_traffic() -> anyhow::Result<()> {
    crate::common::init_logging();
    let bus = MockTransport::new();
    let clock = MockClock::new();
    seed_exchange(&bus, 0x02, &[0x32, 0x01, 0x06, 0x07]);

    let mut dev = chip(&bus, &clock);
    assert_eq!(dev.firmware_version()?, 0x32010607);

    let writes = bus.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(hex::encode(&writes[0].1), "0000ff02fed4022a00");
    assert_eq!(writes[1].1, PN532_NACK.to_vec());
    // ready + ack, ready + peek, ready + frame
    assert_eq!(bus.read_count(), 6);
    assert_eq!(bus.selects(), vec![5, 5]);
    Ok(())
}

#[test]
fn channel_reselected_on_every_operation() {
    let bus = MockTransport::new();
    let clock = MockClock::new();
    seed_exchange(&bus, 0x32, &[]);
    seed_exchange(&bus, 0x32, &[]);
    let mut dev = Pn532Builder::new()
        .with_transport(Box::new(bus.clone()))
        .with_clock(Box::new(clock))
        .channel(2)
        .build()
        .unwrap();
    dev.set_rf_field(true).unwrap();
    dev.set_rf_field(false).unwrap();
    assert_eq!(bus.selects(), vec![2, 2, 2, 2]);
}

#[test]
fn not_ready_respects_policy() {
    let bus = MockTransport::new();
    let clock = MockClock::new();
    let mut dev = Pn532Builder::new()
        .with_transport(Box::new(bus.clone()))
        .with_clock(Box::new(clock.clone()))
        .ready_policy(RetryPolicy::new(3, Duration::from_millis(5)))
        .build()
        .unwrap();
    assert!(matches!(
        dev.set_rf_field(true),
        Err(Error::NotReady { attempts: 3 })
    ));
    assert_eq!(bus.read_count(), 3);
    assert_eq!(clock.now(), 10_000);
}

#[test]
fn nack_in_place_of_ack() {
    let bus = MockTransport::new();
    let clock = MockClock::new();
    bus.push_ready_frame(&PN532_NACK);
    let mut dev = chip(&bus, &clock);
    assert!(matches!(dev.poll_mifare(), Err(Error::NoAck)));
}

#[test]
fn response_for_other_opcode_is_malformed() {
    let bus = MockTransport::new();
    let clock = MockClock::new();
    bus.push_ack();
    bus.push_response(&[0xd5, 0x41, 0x00]).unwrap();
    let mut dev = chip(&bus, &clock);
    assert!(matches!(dev.poll_mifare(), Err(Error::Malformed(_))));
}

#[test]
fn seven_byte_uid_poll() {
    let bus = MockTransport::new();
    let clock = MockClock::new();
    fixtures::seed_mifare_card(&bus, &fixtures::sample_uid7());
    let mut dev = chip(&bus, &clock);
    let target = dev.poll_mifare().unwrap();
    assert_eq!(target.uid.len(), 7);
    assert_eq!(PN532_ACK.len(), 6);
}

#[test]
fn default_config_values() {
    let c = ChipConfig::default();
    assert_eq!((c.address, c.channel), (0x24, 5));
}

use libaime::host::Status;
use libaime::test_support::{EngineFixture, seed_exchange};

use crate::common::{fixtures, roundtrip};
use crate::common::fixtures::PN532_IN_DATA_EXCHANGE;

const KEY_SET_A: u8 = 0x50;
const KEY_SET_B: u8 = 0x54;
const AUTH_A: u8 = 0x51;
const AUTH_B: u8 = 0x55;
const READ: u8 = 0x52;
const WRITE: u8 = 0x53;

fn address(block: u8) -> Vec<u8> {
    let mut p = fixtures::sample_uid4();
    p.push(block);
    p
}

/// Bytes of the InDataExchange parameters in the last command frame
/// (after 00 00 FF len lcs D4 40).
fn last_exchange_params(fx: &EngineFixture) -> Vec<u8> {
    let writes = fx.bus.writes();
    let frame = &writes
        .iter()
        .rev()
        .find(|(_, w)| w.len() > 7 && w[5] == 0xd4)
        .expect("command frame")
        .1;
    frame[7..frame.len() - 2].to_vec()
}

#[test]
fn key_set_then_authenticate_uses_key() {
    let mut fx = EngineFixture::new();
    let resp = roundtrip(&mut fx, KEY_SET_B, &[0x57, 0x43, 0x43, 0x46, 0x76, 0x32]);
    assert_eq!(resp.status, Some(0));
    assert!(resp.payload.is_empty());
    assert_eq!(fx.bus.traffic(), 0);

    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &[0x00]);
    let resp = roundtrip(&mut fx, AUTH_B, &address(4));
    assert_eq!(resp.status, Some(Status::Ok.code()));

    let params = last_exchange_params(&fx);
    assert_eq!(
        hex::encode(&params),
        "01610457434346763204a23b7f"
    );
}

#[test]
fn key_slots_are_separate() {
    let mut fx = EngineFixture::new();
    roundtrip(&mut fx, KEY_SET_A, &[0xa0; 6]);
    roundtrip(&mut fx, KEY_SET_B, &[0xb0; 6]);

    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &[0x00]);
    roundtrip(&mut fx, AUTH_A, &address(1));
    assert_eq!(&last_exchange_params(&fx)[3..9], &[0xa0; 6]);
}

#[test]
fn read_returns_block() {
    let mut fx = EngineFixture::new();
    let mut data = vec![0x00];
    data.extend_from_slice(&[0x3c; 16]);
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &data);

    let resp = roundtrip(&mut fx, READ, &address(2));
    assert_eq!(resp.status, Some(0));
    assert_eq!(resp.payload, vec![0x3c; 16]);
    assert_eq!(last_exchange_params(&fx), vec![0x01, 0x30, 0x02]);
}

#[test]
fn auth_failure_does_not_short_circuit_read() {
    let mut fx = EngineFixture::new();
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &[0x14]);
    let resp = roundtrip(&mut fx, AUTH_A, &address(1));
    assert_eq!(resp.status, Some(Status::AccessError.code()));

    let mut data = vec![0x00];
    data.extend_from_slice(&[0x01; 16]);
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &data);
    let resp = roundtrip(&mut fx, READ, &address(1));
    assert_eq!(resp.status, Some(0));
    assert_eq!(resp.payload.len(), 16);
}

#[test]
fn flagged_status_is_access_error() {
    let mut fx = EngineFixture::new();
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &[0x40]);
    let resp = roundtrip(&mut fx, AUTH_A, &address(1));
    assert_eq!(resp.status, Some(Status::AccessError.code()));

    let mut data = vec![0x80];
    data.extend_from_slice(&[0x01; 16]);
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &data);
    let resp = roundtrip(&mut fx, READ, &address(1));
    assert_eq!(resp.status, Some(Status::AccessError.code()));
    assert!(resp.payload.is_empty());
}

#[test]
fn short_read_is_access_error_not_zeros() {
    let mut fx = EngineFixture::new();
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &[0x00, 0x01, 0x02]);
    let resp = roundtrip(&mut fx, READ, &address(3));
    assert_eq!(resp.status, Some(Status::AccessError.code()));
    assert!(resp.payload.is_empty());
}

#[test]
fn write_forwards_block_data() {
    let mut fx = EngineFixture::new();
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &[0x00]);
    let mut payload = address(6);
    payload.extend_from_slice(&[0x99; 16]);
    let resp = roundtrip(&mut fx, WRITE, &payload);
    assert_eq!(resp.status, Some(0));
    let params = last_exchange_params(&fx);
    assert_eq!(&params[..3], &[0x01, 0xa0, 0x06]);
    assert_eq!(&params[3..], &[0x99; 16]);
}

#[test]
fn select_and_halt_need_no_chip() {
    let mut fx = EngineFixture::new();
    assert_eq!(roundtrip(&mut fx, 0x43, &[]).status, Some(0));
    assert_eq!(roundtrip(&mut fx, 0x44, &[]).status, Some(0));
    assert_eq!(fx.bus.traffic(), 0);
}

#[test]
fn tag_follows_detected_card() {
    let mut fx = EngineFixture::new();
    let mut target = vec![0x01, 0x02, 0x00, 0x04, 0x08, 0x04];
    target.extend_from_slice(&fixtures::sample_uid4());
    seed_exchange(&fx.bus, fixtures::PN532_IN_LIST, &target);
    roundtrip(&mut fx, 0x42, &[]);

    let mut data = vec![0x00];
    data.extend_from_slice(&[0; 16]);
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &data);
    roundtrip(&mut fx, READ, &address(0));
    assert_eq!(last_exchange_params(&fx)[0], 0x02);
}

use libaime::host::Status;
use libaime::test_support::{
    EngineFixture, felica_read_response, felica_write_response, seed_exchange,
};

use crate::common::fixtures::{self, PN532_IN_DATA_EXCHANGE};
use crate::common::roundtrip;

const THROUGH: u8 = 0x71;

/// IDm(8) len code data
fn through_request(code: u8, data: &[u8]) -> Vec<u8> {
    let mut p = fixtures::sample_idm().to_vec();
    p.push((data.len() + 2) as u8);
    p.push(code);
    p.extend_from_slice(data);
    p
}

/// rw IDm, one service, block list
fn block_request(services: &[u16], blocks: &[u16]) -> Vec<u8> {
    let mut d = fixtures::sample_idm().to_vec();
    d.push(services.len() as u8);
    for s in services {
        d.extend_from_slice(&s.to_le_bytes());
    }
    d.push(blocks.len() as u8);
    for b in blocks {
        d.extend_from_slice(&b.to_be_bytes());
    }
    d
}

fn detected() -> EngineFixture {
    let mut fx = EngineFixture::new();
    fixtures::seed_no_target(&fx.bus);
    fixtures::seed_felica_card(&fx.bus);
    roundtrip(&mut fx, 0x42, &[]);
    fx
}

#[test]
fn poll_from_cache_has_no_bus_traffic() {
    let mut fx = detected();
    let before = fx.bus.traffic();

    let resp = roundtrip(&mut fx, THROUGH, &through_request(0x00, &[0xff, 0xff, 0x01, 0x00]));
    assert_eq!(fx.bus.traffic(), before);
    assert_eq!(resp.status, Some(0));

    let p = &resp.payload;
    assert_eq!(p.len(), 20);
    assert_eq!(p[0], 20);
    assert_eq!(p[1], 0x01);
    assert_eq!(&p[2..10], &fixtures::sample_idm());
    assert_eq!(&p[10..18], &fixtures::sample_pmm());
    assert_eq!(&p[18..20], &fixtures::sample_system_code());
}

#[test]
fn system_code_query() {
    let mut fx = detected();
    let resp = roundtrip(&mut fx, THROUGH, &through_request(0x0c, &[]));
    assert_eq!(resp.payload[1], 0x0d);
    assert_eq!(&resp.payload[10..], &[0x01, 0x88, 0xb4]);
}

#[test]
fn without_session_polls_first() {
    let mut fx = EngineFixture::new();
    fixtures::seed_felica_card(&fx.bus);
    let resp = roundtrip(&mut fx, THROUGH, &through_request(0x0c, &[]));
    assert_eq!(resp.status, Some(0));
    assert!(fx.engine.session().is_some());
}

#[test]
fn without_card_is_contactless_error() {
    let mut fx = EngineFixture::new();
    fixtures::seed_no_target(&fx.bus);
    let resp = roundtrip(&mut fx, THROUGH, &through_request(0x0c, &[]));
    assert_eq!(resp.status, Some(Status::ContactlessError.code()));
    assert!(resp.payload.is_empty());
}

#[test]
fn read_id_block_without_bus_round_trip() {
    let mut fx = detected();
    let before = fx.bus.traffic();
    let resp = roundtrip(
        &mut fx,
        THROUGH,
        &through_request(0x06, &block_request(&[0x000b], &[0x8082])),
    );
    assert_eq!(fx.bus.traffic(), before);
    assert_eq!(resp.status, Some(0));

    let p = &resp.payload;
    assert_eq!(p[0] as usize, p.len());
    assert_eq!(p[1], 0x07);
    assert_eq!(&p[10..13], &[0x00, 0x00, 0x01]);
    assert_eq!(&p[13..21], &fixtures::sample_idm());
    assert_eq!(&p[21..29], &[0; 8]);
}

#[test]
fn read_blocks_from_card() {
    let mut fx = detected();
    let idm = fixtures::sample_idm();
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &felica_read_response(&idm, [0x10; 16]));
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &felica_read_response(&idm, [0x20; 16]));

    let resp = roundtrip(
        &mut fx,
        THROUGH,
        &through_request(0x06, &block_request(&[0x000b], &[0x8000, 0x8001])),
    );
    let p = &resp.payload;
    assert_eq!(p.len(), 10 + 3 + 32);
    assert_eq!(p[12], 2);
    assert_eq!(&p[13..29], &[0x10; 16]);
    assert_eq!(&p[29..45], &[0x20; 16]);
}

#[test]
fn two_services_is_contactless_error() {
    let mut fx = detected();
    let before = fx.bus.traffic();
    let resp = roundtrip(
        &mut fx,
        THROUGH,
        &through_request(0x06, &block_request(&[0x000b, 0x000f], &[0x8000])),
    );
    assert_eq!(resp.status, Some(Status::ContactlessError.code()));
    assert!(resp.payload.is_empty());
    assert_eq!(fx.bus.traffic(), before);
}

#[test]
fn failed_read_block_is_contactless_error() {
    let mut fx = detected();
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &[0x01]);
    let resp = roundtrip(
        &mut fx,
        THROUGH,
        &through_request(0x06, &block_request(&[0x000b], &[0x8000])),
    );
    assert_eq!(resp.status, Some(Status::ContactlessError.code()));
    assert!(resp.payload.is_empty());
}

#[test]
fn write_reports_aggregate_status() {
    let mut fx = detected();
    let idm = fixtures::sample_idm();
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &felica_write_response(&idm, [0x01, 0xa8]));
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &felica_write_response(&idm, [0x00, 0x00]));

    let mut data = block_request(&[0x0009], &[0x8000, 0x8001]);
    data.extend_from_slice(&[0x5a; 32]);
    let resp = roundtrip(&mut fx, THROUGH, &through_request(0x08, &data));
    assert_eq!(resp.status, Some(0));
    assert_eq!(resp.payload[1], 0x09);
    assert_eq!(&resp.payload[10..], &[0x01, 0x01]);
    assert_eq!(fx.bus.pending_reads(), 0);
}

#[test]
fn write_success_status() {
    let mut fx = detected();
    let idm = fixtures::sample_idm();
    seed_exchange(&fx.bus, PN532_IN_DATA_EXCHANGE, &felica_write_response(&idm, [0x00, 0x00]));

    let mut data = block_request(&[0x0009], &[0x8000]);
    data.extend_from_slice(&[0x00; 16]);
    let resp = roundtrip(&mut fx, THROUGH, &through_request(0x08, &data));
    assert_eq!(&resp.payload[10..], &[0x00, 0x00]);
}

#[test]
fn nda_a4_single_zero() {
    let mut fx = detected();
    let resp = roundtrip(&mut fx, THROUGH, &through_request(0xa4, &[]));
    assert_eq!(resp.payload.len(), 11);
    assert_eq!(resp.payload[1], 0xa5);
    assert_eq!(resp.payload[10], 0x00);
}

#[test]
fn unknown_sub_code_is_contactless_error() {
    let mut fx = detected();
    let resp = roundtrip(&mut fx, THROUGH, &through_request(0x0a, &[]));
    assert_eq!(resp.status, Some(Status::ContactlessError.code()));
}

#[test]
fn truncated_request_is_contactless_error() {
    let mut fx = detected();
    let resp = roundtrip(&mut fx, THROUGH, &[0x01, 0x02, 0x03]);
    assert_eq!(resp.status, Some(Status::ContactlessError.code()));
}

#[test]
fn failed_poll_clears_contact_session() {
    let mut fx = EngineFixture::new();
    fixtures::seed_mifare_card(&fx.bus, &fixtures::sample_uid4());
    roundtrip(&mut fx, 0x42, &[]);
    assert!(fx.engine.session().is_some());

    fixtures::seed_no_target(&fx.bus);
    let resp = roundtrip(&mut fx, THROUGH, &through_request(0x0c, &[]));
    assert_eq!(resp.status, Some(Status::ContactlessError.code()));
    assert!(fx.engine.session().is_none());
    assert!(fx.engine.current_card().is_none());
}

use libaime::card::{CardSession, FelicaCard};
use libaime::config::ChipConfig;
use libaime::constants::FELICA_ID_BLOCK;
use libaime::device::Pn532;
use libaime::test_support::{felica_read_response, felica_write_response, seed_exchange};
use libaime::transport::{MockClock, MockTransport};
use libaime::types::{BlockData, ServiceCode, SystemCode};
use libaime::Error;

use crate::common::fixtures::{self, PN532_IN_DATA_EXCHANGE};

fn polled_card() -> (MockTransport, Pn532, FelicaCard) {
    let bus = MockTransport::new();
    fixtures::seed_felica_card(&bus);
    let mut dev = Pn532::new(
        Box::new(bus.clone()),
        Box::new(MockClock::new()),
        ChipConfig::default(),
    );
    let card = FelicaCard::from(dev.poll_felica(SystemCode::ANY).unwrap());
    (bus, dev, card)
}

#[test]
fn poll_populates_session_fields() {
    let (_, _, card) = polled_card();
    assert_eq!(card.idm().as_bytes(), &fixtures::sample_idm());
    assert_eq!(card.pmm().as_bytes(), &fixtures::sample_pmm());
    assert_eq!(card.system_code().to_be_bytes(), fixtures::sample_system_code());

    let session = CardSession::from(card);
    assert_eq!(session.summary().to_string(), "contactless 012E4C0123456789");
}

#[test]
fn id_block_served_from_session() -> anyhow::Result<()> {
    let (bus, mut dev, card) = polled_card();
    let before = bus.traffic();
    let blocks = card.read_blocks(&mut dev, &[ServiceCode::new(0x000b)], &[FELICA_ID_BLOCK])?;
    assert_eq!(bus.traffic(), before);
    assert_eq!(&blocks[0].as_bytes()[..8], &fixtures::sample_idm());
    Ok(())
}

#[test]
fn read_mixed_blocks() -> anyhow::Result<()> {
    let (bus, mut dev, card) = polled_card();
    let idm = fixtures::sample_idm();
    seed_exchange(&bus, PN532_IN_DATA_EXCHANGE, &felica_read_response(&idm, [0xa5; 16]));
    let blocks = card.read_blocks(
        &mut dev,
        &[ServiceCode::new(0x000b)],
        &[FELICA_ID_BLOCK, 0x8004],
    )?;
    assert_eq!(blocks[1], BlockData::from_bytes([0xa5; 16]));
    Ok(())
}

#[test]
fn two_services_hard_failure() {
    let (bus, mut dev, card) = polled_card();
    let before = bus.traffic();
    let res = card.read_blocks(
        &mut dev,
        &[ServiceCode::new(0x000b), ServiceCode::new(0x000f)],
        &[0x8000],
    );
    assert!(matches!(res, Err(Error::ProtocolViolation(_))));
    assert_eq!(bus.traffic(), before);
}

#[test]
fn best_effort_write_attempts_every_block() -> anyhow::Result<()> {
    let (bus, mut dev, card) = polled_card();
    let idm = fixtures::sample_idm();
    seed_exchange(&bus, PN532_IN_DATA_EXCHANGE, &felica_write_response(&idm, [0, 0]));
    // second block: the chip gives up on the card
    seed_exchange(&bus, PN532_IN_DATA_EXCHANGE, &[0x01]);
    seed_exchange(&bus, PN532_IN_DATA_EXCHANGE, &felica_write_response(&idm, [0, 0]));

    let blocks: Vec<(u16, BlockData)> = (0u16..3)
        .map(|i| (0x8000 + i, BlockData::from_bytes([i as u8; 16])))
        .collect();
    let outcome = card.write_blocks(&mut dev, &[ServiceCode::new(0x0009)], &blocks)?;
    assert_eq!(outcome.attempted, 3);
    assert_eq!(outcome.failed, 1);
    assert_eq!(bus.pending_reads(), 0);
    Ok(())
}

// Card identities and chip replies shared by the integration tests.

use libaime::test_support::{felica_target, mifare_target, seed_exchange};
use libaime::transport::MockTransport;

pub const PN532_IN_LIST: u8 = 0x4a;
pub const PN532_IN_DATA_EXCHANGE: u8 = 0x40;

pub fn sample_idm() -> [u8; 8] {
    hex_array("012E4C0123456789")
}

pub fn sample_pmm() -> [u8; 8] {
    hex_array("00F1000000014300")
}

pub fn sample_system_code() -> [u8; 2] {
    [0x88, 0xb4]
}

pub fn sample_uid4() -> Vec<u8> {
    hex::decode("04A23B7F").unwrap()
}

pub fn sample_uid7() -> Vec<u8> {
    hex::decode("04112233445566").unwrap()
}

pub fn hex_array<const N: usize>(s: &str) -> [u8; N] {
    let v = hex::decode(s).unwrap();
    v.try_into().unwrap()
}

/// Chip answers the contact poll with `uid`.
pub fn seed_mifare_card(bus: &MockTransport, uid: &[u8]) {
    seed_exchange(bus, PN532_IN_LIST, &mifare_target(uid));
}

/// Chip reports no contact target.
pub fn seed_no_target(bus: &MockTransport) {
    seed_exchange(bus, PN532_IN_LIST, &[0x00]);
}

/// Chip answers the contactless poll with the sample card.
pub fn seed_felica_card(bus: &MockTransport) {
    seed_exchange(
        bus,
        PN532_IN_LIST,
        &felica_target(&sample_idm(), &sample_pmm(), sample_system_code()),
    );
}

// libaime/src/protocol/commands/exchange.rs

//! InDataExchange parameter builders. The first parameter is always the
//! target tag the chip handed out when the card was listed.

use crate::constants::{MIFARE_CMD_AUTH_A, MIFARE_CMD_AUTH_B, MIFARE_CMD_READ, MIFARE_CMD_WRITE};
use crate::types::{BlockData, Idm, KeySlot, MifareKey, Uid};

/// MIFARE Classic authentication: tag, auth cmd, block, key(6), uid
pub fn encode_mifare_auth(tag: u8, slot: KeySlot, block: u8, key: &MifareKey, uid: &Uid) -> Vec<u8> {
    let auth = match slot {
        KeySlot::A => MIFARE_CMD_AUTH_A,
        KeySlot::B => MIFARE_CMD_AUTH_B,
    };
    let mut buf = Vec::with_capacity(3 + 6 + uid.len());
    buf.push(tag);
    buf.push(auth);
    buf.push(block);
    buf.extend_from_slice(key.as_bytes());
    buf.extend_from_slice(uid.as_bytes());
    buf
}

/// MIFARE Classic 16-byte block read
pub fn encode_mifare_read(tag: u8, block: u8) -> Vec<u8> {
    vec![tag, MIFARE_CMD_READ, block]
}

/// MIFARE Classic 16-byte block write
pub fn encode_mifare_write(tag: u8, block: u8, data: &BlockData) -> Vec<u8> {
    let mut buf = Vec::with_capacity(3 + 16);
    buf.push(tag);
    buf.push(MIFARE_CMD_WRITE);
    buf.push(block);
    buf.extend_from_slice(data.as_bytes());
    buf
}

/// Wrap a FeliCa command for the card addressed by `idm`. The FeliCa
/// length byte counts itself, the command code, the IDm and the params.
pub fn encode_felica_exchange(tag: u8, idm: &Idm, code: u8, params: &[u8]) -> Vec<u8> {
    let felica_len = 1 + 1 + 8 + params.len();
    let mut buf = Vec::with_capacity(1 + felica_len);
    buf.push(tag);
    buf.push(felica_len as u8);
    buf.push(code);
    buf.extend_from_slice(idm.as_bytes());
    buf.extend_from_slice(params);
    buf
}

// libaime/src/protocol/commands/felica.rs

use crate::types::{BlockData, ServiceCode};

/// Encode ReadWithoutEncryption parameters for one service and one
/// two-byte block list element (big-endian).
pub fn encode_felica_read(service: ServiceCode, block: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(6);
    buf.push(1); // service count
    buf.extend_from_slice(&service.to_le_bytes());
    buf.push(1); // block count
    buf.extend_from_slice(&block.to_be_bytes());
    buf
}

/// Encode WriteWithoutEncryption parameters for one block.
pub fn encode_felica_write(service: ServiceCode, block: u16, data: &BlockData) -> Vec<u8> {
    let mut buf = encode_felica_read(service, block);
    buf.extend_from_slice(data.as_bytes());
    buf
}

use crate::card::FelicaCard;
use crate::constants::FELICA_ID_BLOCK;
use crate::device::Pn532;
use crate::types::{BlockData, ServiceCode};
use crate::Result;

use super::single_service;

/// The ID block holds the IDm followed by eight zero bytes. It is served
/// from the session, not from the card.
fn id_block(card: &FelicaCard) -> BlockData {
    let mut bytes = [0u8; 16];
    bytes[..8].copy_from_slice(card.idm().as_bytes());
    BlockData::from_bytes(bytes)
}

/// Read blocks from one service, one ReadWithoutEncryption per block.
/// Any failed block fails the whole read.
pub fn read_blocks(
    card: &FelicaCard,
    device: &mut Pn532,
    services: &[ServiceCode],
    blocks: &[u16],
) -> Result<Vec<BlockData>> {
    let service = single_service(services)?;

    let mut out = Vec::with_capacity(blocks.len());
    for &block in blocks {
        if block == FELICA_ID_BLOCK {
            out.push(id_block(card));
            continue;
        }
        let data = device.felica_read(card.tag(), card.idm(), service, block)?;
        out.push(data);
    }
    Ok(out)
}

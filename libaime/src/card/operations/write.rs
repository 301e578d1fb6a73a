use crate::card::FelicaCard;
use crate::device::Pn532;
use crate::types::{BlockData, ServiceCode};
use crate::Result;

use super::single_service;

/// Result of a best-effort multi-block write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOutcome {
    pub attempted: usize,
    pub failed: usize,
}

impl WriteOutcome {
    pub fn is_ok(&self) -> bool {
        self.failed == 0
    }
}

/// Write blocks to one service, one WriteWithoutEncryption per block. A
/// failed block is counted and the remaining blocks are still written.
pub fn write_blocks(
    card: &FelicaCard,
    device: &mut Pn532,
    services: &[ServiceCode],
    blocks: &[(u16, BlockData)],
) -> Result<WriteOutcome> {
    let service = single_service(services)?;

    let mut outcome = WriteOutcome::default();
    for (block, data) in blocks {
        outcome.attempted += 1;
        if let Err(e) = device.felica_write(card.tag(), card.idm(), service, *block, data) {
            log::warn!("felica write to block {:#06x} failed: {}", block, e);
            outcome.failed += 1;
        }
    }
    Ok(outcome)
}

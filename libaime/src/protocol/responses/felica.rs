// libaime/src/protocol/responses/felica.rs

use crate::constants::{FELICA_CMD_READ_WITHOUT_ENCRYPTION, FELICA_CMD_WRITE_WITHOUT_ENCRYPTION};
use crate::protocol::parser;
use crate::types::BlockData;
use crate::{Error, Result};

fn expect_status_flags(data: &[u8]) -> Result<()> {
    let status1 = parser::byte_at(data, 9)?;
    let status2 = parser::byte_at(data, 10)?;
    if status1 != 0 || status2 != 0 {
        return Err(Error::ChipStatus { status: status1 });
    }
    Ok(())
}

/// Decode a single-block ReadWithoutEncryption response.
/// Layout: 0x07 IDm(8) status1 status2 block_count block(16)
pub fn decode_felica_read(data: &[u8]) -> Result<BlockData> {
    const LEN: usize = 1 + 8 + 2 + 1 + 16;
    parser::expect_response_code(data, FELICA_CMD_READ_WITHOUT_ENCRYPTION + 1)?;
    expect_status_flags(data)?;
    if data.len() != LEN {
        return Err(Error::InvalidLength {
            expected: LEN,
            actual: data.len(),
        });
    }
    BlockData::try_from(&data[12..])
}

/// Decode a WriteWithoutEncryption response.
/// Layout: 0x09 IDm(8) status1 status2
pub fn decode_felica_write(data: &[u8]) -> Result<()> {
    parser::expect_response_code(data, FELICA_CMD_WRITE_WITHOUT_ENCRYPTION + 1)?;
    expect_status_flags(data)
}

// libaime/src/protocol/responses/exchange.rs

use crate::protocol::parser;
use crate::types::BlockData;
use crate::{Error, Result};

/// Check the InDataExchange status byte and return the card data after it.
/// Only a zero status is success; MI/NAD flags count as failure too.
pub fn decode_exchange_status(data: &[u8]) -> Result<&[u8]> {
    let status = parser::byte_at(data, 0)?;
    if status != 0 {
        return Err(Error::ChipStatus { status });
    }
    Ok(&data[1..])
}

/// MIFARE read result: status(1) + block(16)
pub fn decode_mifare_read(data: &[u8]) -> Result<BlockData> {
    let body = decode_exchange_status(data)?;
    if body.len() != 16 {
        return Err(Error::InvalidLength {
            expected: 17,
            actual: data.len(),
        });
    }
    BlockData::try_from(body)
}

/// FeliCa exchange result: status(1) + length(1) + response(length - 1).
/// Returns the inner FeliCa response starting at its response code.
pub fn decode_felica_exchange(data: &[u8]) -> Result<Vec<u8>> {
    decode_exchange_status(data)?;
    let declared = parser::byte_at(data, 1)? as usize;
    if declared == 0 {
        return Err(Error::Malformed("zero FeliCa length".into()));
    }
    let inner_len = declared - 1;
    if data.len() - 2 != inner_len {
        return Err(Error::InvalidLength {
            expected: inner_len + 2,
            actual: data.len(),
        });
    }
    Ok(data[2..].to_vec())
}

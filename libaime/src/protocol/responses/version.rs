// libaime/src/protocol/responses/version.rs

use crate::protocol::parser;
use crate::Result;

/// GetFirmwareVersion: IC(1) Ver(1) Rev(1) Support(1), packed big-endian.
pub fn decode_firmware_version(data: &[u8]) -> Result<u32> {
    let bytes = parser::slice_at(data, 0, 4)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

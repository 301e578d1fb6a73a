// libaime/src/protocol/codec.rs

use crate::constants::PN532_CMD_PREFIX_DEVICE;
use crate::{Error, Result};

use super::ChipFrame;
use super::commands::ChipCommand;

/// Encode a ChipCommand into a full wire frame (preamble/LCS/DCS/postamble).
pub fn encode_command_frame(cmd: &ChipCommand) -> Result<Vec<u8>> {
    ChipFrame::encode(&cmd.encode())
}

/// Validate the chip->host envelope of a decoded frame payload and return
/// the response data that follows `D5 <opcode + 1>`.
pub fn unwrap_response(expected_opcode: u8, payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() < 2 {
        return Err(Error::InvalidLength {
            expected: 2,
            actual: payload.len(),
        });
    }
    if payload[0] != PN532_CMD_PREFIX_DEVICE {
        return Err(Error::UnexpectedResponse {
            expected: PN532_CMD_PREFIX_DEVICE,
            actual: payload[0],
        });
    }
    let expected = expected_opcode.wrapping_add(1);
    if payload[1] != expected {
        return Err(Error::UnexpectedResponse {
            expected,
            actual: payload[1],
        });
    }
    Ok(payload[2..].to_vec())
}

/// Decode a full wire frame and strip the response envelope for the
/// expected opcode.
pub fn decode_response_frame(expected_opcode: u8, frame: &[u8]) -> Result<Vec<u8>> {
    let payload = ChipFrame::decode(frame)?;
    unwrap_response(expected_opcode, &payload)
}

// libaime/src/protocol/frame.rs

use crate::constants::{CHIP_MAX_PAYLOAD_LEN, CHIP_MIN_FRAME_LEN, CHIP_POSTAMBLE, CHIP_PREAMBLE};
use crate::protocol::checksum::{dcs, lcs};
use crate::{Error, Result};

/// PN532 normal information frame.
/// Format: [Preamble+Start(3)] [Len(1)] [LCS(1)] [Payload(n)] [DCS(1)] [Postamble(1)]
/// Preamble: 0x00 0x00 0xFF
/// Postamble: 0x00
pub struct ChipFrame;

impl ChipFrame {
    /// Encode a payload (direction byte included) into a full chip frame
    pub fn encode(payload: &[u8]) -> Result<Vec<u8>> {
        if payload.len() > CHIP_MAX_PAYLOAD_LEN {
            return Err(Error::InvalidLength {
                expected: CHIP_MAX_PAYLOAD_LEN,
                actual: payload.len(),
            });
        }

        let len = payload.len() as u8;
        let mut out = Vec::with_capacity(CHIP_MIN_FRAME_LEN + payload.len());
        out.extend_from_slice(&CHIP_PREAMBLE);
        out.push(len);
        out.push(lcs(len));
        out.extend_from_slice(payload);
        out.push(dcs(payload));
        out.push(CHIP_POSTAMBLE);
        Ok(out)
    }

    /// Read the declared payload length from the first five bytes of a
    /// frame, validating the preamble and LCS on the way.
    pub fn declared_len(header: &[u8]) -> Result<usize> {
        if header.len() < 5 {
            return Err(Error::InvalidLength {
                expected: 5,
                actual: header.len(),
            });
        }
        if header[..3] != CHIP_PREAMBLE {
            return Err(Error::FrameFormat("invalid preamble".into()));
        }
        let len = header[3];
        let expected = lcs(len);
        if header[4] != expected {
            return Err(Error::ChecksumMismatch {
                expected,
                actual: header[4],
            });
        }
        Ok(len as usize)
    }

    /// Decode a full chip frame and return the payload. Trailing bytes
    /// after the postamble are ignored since bus reads are fixed-size.
    pub fn decode(frame: &[u8]) -> Result<Vec<u8>> {
        if frame.len() < CHIP_MIN_FRAME_LEN {
            return Err(Error::InvalidLength {
                expected: CHIP_MIN_FRAME_LEN,
                actual: frame.len(),
            });
        }

        let len = Self::declared_len(frame)?;

        let required_len = CHIP_MIN_FRAME_LEN + len;
        if frame.len() < required_len {
            return Err(Error::InvalidLength {
                expected: required_len,
                actual: frame.len(),
            });
        }

        let payload_start = 5usize;
        let payload_end = payload_start + len;
        let payload = &frame[payload_start..payload_end];

        let dcs_actual = frame[payload_end];
        let dcs_expected = dcs(payload);
        if dcs_actual != dcs_expected {
            return Err(Error::ChecksumMismatch {
                expected: dcs_expected,
                actual: dcs_actual,
            });
        }

        if frame[payload_end + 1] != CHIP_POSTAMBLE {
            return Err(Error::FrameFormat("invalid postamble".into()));
        }

        Ok(payload.to_vec())
    }
}

// libaime/src/protocol/parser.rs

use crate::types::{Idm, Pmm};
use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a big-endian u16 at given index, with bounds checking.
pub fn be_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    ensure_len(data, idx + 2)?;
    Ok(u16::from_be_bytes([data[idx], data[idx + 1]]))
}

/// Read a little-endian u16 at given index, with bounds checking.
pub fn le_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    ensure_len(data, idx + 2)?;
    Ok(u16::from_le_bytes([data[idx], data[idx + 1]]))
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Parse an Idm (8 bytes) at `start` index with bounds checking.
pub fn idm_at(data: &[u8], start: usize) -> Result<Idm> {
    Idm::try_from(slice_at(data, start, 8)?)
}

/// Parse a PMm (8 bytes) at `start` index with bounds checking.
pub fn pmm_at(data: &[u8], start: usize) -> Result<Pmm> {
    Pmm::try_from(slice_at(data, start, 8)?)
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Ensure the first byte (response code) equals `expected`.
pub fn expect_response_code(data: &[u8], expected: u8) -> Result<()> {
    let actual = byte_at(data, 0)?;
    if actual != expected {
        return Err(Error::UnexpectedResponse { expected, actual });
    }
    Ok(())
}

//! Hexadecimal helpers for log output and the card summary shown by the
//! diagnostic shell.

use std::fmt::Write;

/// Convert a byte slice to an uppercase hex string without separators,
/// the form card identifiers are printed in.
///
/// Example: `&[0xde, 0xad]` -> `"DEAD"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02X}", b);
    }
    s
}

/// Convert a byte slice to a lowercase hex string with a single space
/// between each byte, used for frame dumps.
///
/// Example: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

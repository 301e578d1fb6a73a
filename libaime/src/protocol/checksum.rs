// libaime/src/protocol/checksum.rs

/// Compute Length Checksum (LCS) for a chip frame
/// LCS = 0x100 - length (mod 256)
pub fn lcs(len: u8) -> u8 {
    0u8.wrapping_sub(len)
}

/// Compute Data Checksum (DCS) for a chip frame
/// DCS = 0x100 - (sum(payload) & 0xff)
pub fn dcs(payload: &[u8]) -> u8 {
    0u8.wrapping_sub(sum(payload))
}

/// Additive checksum used by the host protocol. The trailer byte is the
/// plain sum of every unescaped frame byte, not its complement.
pub fn sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

// libaime/src/types.rs

use crate::Error;
use std::convert::TryFrom;

/// IDm - Newtype Pattern (8 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Idm([u8; 8]);

impl Idm {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Idm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(fixed::<8>(bytes)?))
    }
}

/// PMm - Newtype Pattern (8 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pmm([u8; 8]);

impl Pmm {
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Pmm {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(fixed::<8>(bytes)?))
    }
}

/// SystemCode (u16). Kept in the byte order the card sent it, which is
/// big-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemCode(u16);

impl SystemCode {
    pub const ANY: Self = Self(0xffff);

    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(bytes))
    }
}

/// ServiceCode (u16, little-endian on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceCode(u16);

impl ServiceCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    pub fn to_le_bytes(&self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    pub fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }
}

/// BlockData (16 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockData([u8; 16]);

impl BlockData {
    pub const ZERO: Self = Self([0u8; 16]);

    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(fixed::<16>(bytes)?))
    }
}

/// Contact-family card UID. ISO14443A UIDs are 4, 7 or 10 bytes long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uid {
    bytes: [u8; Uid::MAX_LEN],
    len: u8,
}

impl Uid {
    pub const MAX_LEN: usize = 10;

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.is_empty() || bytes.len() > Self::MAX_LEN {
            return Err(Error::InvalidLength {
                expected: Self::MAX_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; Self::MAX_LEN];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: arr,
            len: bytes.len() as u8,
        })
    }
}

/// Card family as reported to the host in the detect response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum CardFamily {
    /// MIFARE Classic style card (key-authenticated blocks)
    #[display(fmt = "contact")]
    Contact,
    /// FeliCa style card (IDm/PMm/system code)
    #[display(fmt = "contactless")]
    Contactless,
}

impl CardFamily {
    /// Type byte used in the card-detect response.
    pub fn type_code(&self) -> u8 {
        match self {
            Self::Contact => 0x10,
            Self::Contactless => 0x20,
        }
    }
}

/// Which of the two MIFARE key slots a command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySlot {
    A,
    B,
}

/// 6-byte MIFARE sector key
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct MifareKey([u8; 6]);

impl MifareKey {
    pub fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl TryFrom<&[u8]> for MifareKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(fixed::<6>(bytes)?))
    }
}

// Keys must not end up in logs.
impl std::fmt::Debug for MifareKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MifareKey(..)")
    }
}

/// Which pair of canned identity strings the reader reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaudMode {
    /// 38400 baud reader generation
    #[default]
    Standard,
    /// 115200 baud reader generation
    High,
}

fn fixed<const N: usize>(bytes: &[u8]) -> Result<[u8; N], Error> {
    <[u8; N]>::try_from(bytes).map_err(|_| Error::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

// libaime/src/constants.rs
//! Wire constants shared by the host framing and the chip link.

/// Host frame sync byte. Always restarts frame collection.
pub const HOST_SYNC: u8 = 0xE0;

/// Host frame escape marker. The following byte was sent as `byte - 1`.
pub const HOST_ESCAPE: u8 = 0xD0;

/// Request header: len, addr, seq, cmd, payload_len
pub const HOST_REQUEST_HEADER_LEN: usize = 5;

/// Response header: len, addr, seq, cmd, status, payload_len
pub const HOST_RESPONSE_HEADER_LEN: usize = 6;

/// Largest payload that still fits a response length byte.
pub const HOST_MAX_PAYLOAD_LEN: usize = 255 - HOST_RESPONSE_HEADER_LEN;

/// Frame assembly window measured from the sync byte (200 ms).
pub const HOST_FRAME_TIMEOUT_US: u64 = 200_000;

/// Chip frame preamble + start code: 0x00 0x00 0xFF
pub const CHIP_PREAMBLE: [u8; 3] = [0x00, 0x00, 0xFF];

/// Chip frame postamble: 0x00
pub const CHIP_POSTAMBLE: u8 = 0x00;

/// Minimal chip frame length: preamble(3) + len + lcs + dcs + postamble
pub const CHIP_MIN_FRAME_LEN: usize = 7;

/// Maximum payload length for a normal information frame
pub const CHIP_MAX_PAYLOAD_LEN: usize = 255;

/// PN532 host->chip prefix (D4) and chip->host prefix (D5)
pub const PN532_CMD_PREFIX_HOST: u8 = 0xD4;
pub const PN532_CMD_PREFIX_DEVICE: u8 = 0xD5;

/// Default 7-bit I2C address of the PN532
pub const PN532_I2C_ADDRESS: u8 = 0x24;

/// Status byte the PN532 prefixes to every I2C read once it has data.
pub const PN532_STATUS_READY: u8 = 0x01;

/// ACK frame returned after every accepted command frame
pub const PN532_ACK: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// NACK frame asking the chip to resend its last response
pub const PN532_NACK: [u8; 6] = [0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00];

/// PN532 opcodes used by this crate
pub const PN532_CMD_GET_FIRMWARE_VERSION: u8 = 0x02;
pub const PN532_CMD_SAM_CONFIGURATION: u8 = 0x14;
pub const PN532_CMD_RF_CONFIGURATION: u8 = 0x32;
pub const PN532_CMD_IN_DATA_EXCHANGE: u8 = 0x40;
pub const PN532_CMD_INLIST_PASSIVE_TARGET: u8 = 0x4A;

/// MIFARE Classic card-level commands carried by InDataExchange
pub const MIFARE_CMD_AUTH_A: u8 = 0x60;
pub const MIFARE_CMD_AUTH_B: u8 = 0x61;
pub const MIFARE_CMD_READ: u8 = 0x30;
pub const MIFARE_CMD_WRITE: u8 = 0xA0;

/// FeliCa card-level commands carried by InDataExchange
pub const FELICA_CMD_POLLING: u8 = 0x00;
pub const FELICA_CMD_READ_WITHOUT_ENCRYPTION: u8 = 0x06;
pub const FELICA_CMD_WRITE_WITHOUT_ENCRYPTION: u8 = 0x08;

/// Block list element addressing the card's own ID block. Served from
/// the cached IDm instead of the chip.
pub const FELICA_ID_BLOCK: u16 = 0x8082;

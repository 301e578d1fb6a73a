// libaime/src/protocol/responses/mod.rs

//! Decoders for the data part of chip responses (after the D5 + opcode
//! envelope has been stripped by the link).

pub mod exchange;
pub mod felica;
pub mod target;
pub mod version;

pub use exchange::{decode_exchange_status, decode_felica_exchange, decode_mifare_read};
pub use felica::{decode_felica_read, decode_felica_write};
pub use target::{FelicaTarget, MifareTarget, decode_felica_target, decode_mifare_target};
pub use version::decode_firmware_version;

// libaime/src/protocol/commands/mod.rs

pub mod exchange;
pub mod felica;
pub mod target;

pub use exchange::{
    encode_felica_exchange, encode_mifare_auth, encode_mifare_read, encode_mifare_write,
};
pub use felica::{encode_felica_read, encode_felica_write};
pub use target::{encode_list_felica, encode_list_mifare};

use crate::constants::{
    PN532_CMD_GET_FIRMWARE_VERSION, PN532_CMD_IN_DATA_EXCHANGE, PN532_CMD_INLIST_PASSIVE_TARGET,
    PN532_CMD_RF_CONFIGURATION, PN532_CMD_SAM_CONFIGURATION,
};
use crate::types::{BlockData, Idm, KeySlot, MifareKey, SystemCode, Uid};

/// High-level chip command. Per-command parameter encoders live in
/// `protocol::commands::<name>.rs`.
#[derive(Debug, Clone)]
pub enum ChipCommand {
    GetFirmwareVersion,
    /// Normal mode, 1 s virtual-card timeout, IRQ enabled
    SamConfiguration,
    RfField {
        on: bool,
    },
    /// InListPassiveTarget at 106 kbps type A
    ListMifare,
    /// InListPassiveTarget at 212 kbps FeliCa with an embedded polling request
    ListFelica {
        system_code: SystemCode,
        request_code: u8,
        time_slot: u8,
    },
    MifareAuth {
        tag: u8,
        slot: KeySlot,
        block: u8,
        key: MifareKey,
        uid: Uid,
    },
    MifareRead {
        tag: u8,
        block: u8,
    },
    MifareWrite {
        tag: u8,
        block: u8,
        data: BlockData,
    },
    /// FeliCa card command carried through InDataExchange
    FelicaExchange {
        tag: u8,
        idm: Idm,
        code: u8,
        params: Vec<u8>,
    },
}

impl ChipCommand {
    /// PN532 opcode; the response opcode is this value + 1.
    pub fn opcode(&self) -> u8 {
        match self {
            Self::GetFirmwareVersion => PN532_CMD_GET_FIRMWARE_VERSION,
            Self::SamConfiguration => PN532_CMD_SAM_CONFIGURATION,
            Self::RfField { .. } => PN532_CMD_RF_CONFIGURATION,
            Self::ListMifare | Self::ListFelica { .. } => PN532_CMD_INLIST_PASSIVE_TARGET,
            Self::MifareAuth { .. }
            | Self::MifareRead { .. }
            | Self::MifareWrite { .. }
            | Self::FelicaExchange { .. } => {
                PN532_CMD_IN_DATA_EXCHANGE
            }
        }
    }

    /// Encode the parameters that follow the opcode.
    pub fn params(&self) -> Vec<u8> {
        match self {
            Self::GetFirmwareVersion => Vec::new(),
            Self::SamConfiguration => vec![0x01, 0x14, 0x01],
            // CfgItem 0x01 = RF field; bit 1 would enable auto RFCA
            Self::RfField { on } => vec![0x01, u8::from(*on)],
            Self::ListMifare => encode_list_mifare(),
            Self::ListFelica {
                system_code,
                request_code,
                time_slot,
            } => encode_list_felica(*system_code, *request_code, *time_slot),
            Self::MifareAuth {
                tag,
                slot,
                block,
                key,
                uid,
            } => encode_mifare_auth(*tag, *slot, *block, key, uid),
            Self::MifareRead { tag, block } => encode_mifare_read(*tag, *block),
            Self::MifareWrite { tag, block, data } => encode_mifare_write(*tag, *block, data),
            Self::FelicaExchange {
                tag,
                idm,
                code,
                params,
            } => encode_felica_exchange(*tag, idm, *code, params),
        }
    }

    /// Full host->chip envelope: direction byte, opcode, parameters.
    pub fn encode(&self) -> Vec<u8> {
        let params = self.params();
        let mut buf = Vec::with_capacity(2 + params.len());
        buf.push(crate::constants::PN532_CMD_PREFIX_HOST);
        buf.push(self.opcode());
        buf.extend_from_slice(&params);
        buf
    }
}

// libaime/src/device/handle.rs

use crate::config::ChipConfig;
use crate::constants::{FELICA_CMD_READ_WITHOUT_ENCRYPTION, FELICA_CMD_WRITE_WITHOUT_ENCRYPTION};
use crate::device::link::ChipLink;
use crate::protocol::commands::{encode_felica_read, encode_felica_write};
use crate::protocol::{
    ChipCommand, FelicaTarget, MifareTarget, decode_exchange_status, decode_felica_exchange,
    decode_felica_read, decode_felica_target, decode_felica_write, decode_firmware_version,
    decode_mifare_read, decode_mifare_target,
};
use crate::transport::{Clock, Transport};
use crate::types::{BlockData, Idm, KeySlot, MifareKey, ServiceCode, SystemCode, Uid};
use crate::Result;

/// Typed operations on a PN532 reader chip.
pub struct Pn532 {
    link: ChipLink,
}

impl Pn532 {
    /// Create a handle from an existing transport and clock. This is
    /// primarily intended for tests where mocks are provided.
    pub fn new(transport: Box<dyn Transport>, clock: Box<dyn Clock>, config: ChipConfig) -> Self {
        Self {
            link: ChipLink::new(transport, clock, config),
        }
    }

    pub fn config(&self) -> &ChipConfig {
        self.link.config()
    }

    /// Put the SAM in normal mode so the chip answers card commands.
    pub fn initialize(&mut self) -> Result<()> {
        self.link.exchange(&ChipCommand::SamConfiguration)?;
        log::debug!("pn532 SAM configured");
        Ok(())
    }

    /// IC, Ver, Rev, Support packed big-endian.
    pub fn firmware_version(&mut self) -> Result<u32> {
        let data = self.link.exchange(&ChipCommand::GetFirmwareVersion)?;
        decode_firmware_version(&data)
    }

    pub fn set_rf_field(&mut self, on: bool) -> Result<()> {
        self.link.exchange(&ChipCommand::RfField { on })?;
        Ok(())
    }

    /// List one 106 kbps type A target.
    pub fn poll_mifare(&mut self) -> Result<MifareTarget> {
        let data = self.link.exchange(&ChipCommand::ListMifare)?;
        decode_mifare_target(&data)
    }

    /// List one FeliCa target answering `system_code`.
    pub fn poll_felica(&mut self, system_code: SystemCode) -> Result<FelicaTarget> {
        let data = self.link.exchange(&ChipCommand::ListFelica {
            system_code,
            request_code: 0x01,
            time_slot: 0x00,
        })?;
        decode_felica_target(&data)
    }

    pub fn mifare_auth(
        &mut self,
        tag: u8,
        slot: KeySlot,
        block: u8,
        key: &MifareKey,
        uid: &Uid,
    ) -> Result<()> {
        let data = self.link.exchange(&ChipCommand::MifareAuth {
            tag,
            slot,
            block,
            key: *key,
            uid: *uid,
        })?;
        decode_exchange_status(&data)?;
        Ok(())
    }

    pub fn mifare_read(&mut self, tag: u8, block: u8) -> Result<BlockData> {
        let data = self.link.exchange(&ChipCommand::MifareRead { tag, block })?;
        decode_mifare_read(&data)
    }

    pub fn mifare_write(&mut self, tag: u8, block: u8, data: &BlockData) -> Result<()> {
        let resp = self.link.exchange(&ChipCommand::MifareWrite {
            tag,
            block,
            data: *data,
        })?;
        decode_exchange_status(&resp)?;
        Ok(())
    }

    /// Send a FeliCa command to the listed target and return the card's
    /// response, starting at its response code.
    pub fn felica_command(&mut self, tag: u8, idm: &Idm, code: u8, params: &[u8]) -> Result<Vec<u8>> {
        let data = self.link.exchange(&ChipCommand::FelicaExchange {
            tag,
            idm: *idm,
            code,
            params: params.to_vec(),
        })?;
        decode_felica_exchange(&data)
    }

    pub fn felica_read(
        &mut self,
        tag: u8,
        idm: &Idm,
        service: ServiceCode,
        block: u16,
    ) -> Result<BlockData> {
        let params = encode_felica_read(service, block);
        let resp = self.felica_command(tag, idm, FELICA_CMD_READ_WITHOUT_ENCRYPTION, &params)?;
        decode_felica_read(&resp)
    }

    pub fn felica_write(
        &mut self,
        tag: u8,
        idm: &Idm,
        service: ServiceCode,
        block: u16,
        data: &BlockData,
    ) -> Result<()> {
        let params = encode_felica_write(service, block, data);
        let resp = self.felica_command(tag, idm, FELICA_CMD_WRITE_WITHOUT_ENCRYPTION, &params)?;
        decode_felica_write(&resp)
    }
}

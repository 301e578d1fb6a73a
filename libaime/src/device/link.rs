// libaime/src/device/link.rs

//! Frame-level link to the PN532 over I2C: command write + ACK, status
//! polling, length peek + NACK, and validated response reads.

use crate::config::ChipConfig;
use crate::constants::{PN532_ACK, PN532_NACK, PN532_STATUS_READY};
use crate::protocol::{ChipCommand, ChipFrame, codec};
use crate::transport::{Clock, Transport};
use crate::{Error, Result};

/// Largest response data the link will hand back (frame length minus the
/// D5/opcode envelope).
pub const MAX_RESPONSE_LEN: usize = 253;

fn malformed(err: Error) -> Error {
    match err {
        Error::Malformed(_) => err,
        other => Error::Malformed(other.to_string()),
    }
}

#[cfg(feature = "diagnostics")]
fn dump(label: &str, bytes: &[u8]) {
    log::trace!("pn532 {}: {}", label, crate::utils::bytes_to_hex_spaced(bytes));
}

#[cfg(not(feature = "diagnostics"))]
fn dump(_label: &str, _bytes: &[u8]) {}

pub struct ChipLink {
    transport: Box<dyn Transport>,
    clock: Box<dyn Clock>,
    config: ChipConfig,
}

impl ChipLink {
    pub fn new(transport: Box<dyn Transport>, clock: Box<dyn Clock>, config: ChipConfig) -> Self {
        Self {
            transport,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &ChipConfig {
        &self.config
    }

    fn select(&mut self) -> Result<()> {
        self.transport.select_channel(self.config.channel)
    }

    fn bus_write(&mut self, data: &[u8]) -> Result<()> {
        dump("write", data);
        let timeout = self.config.io_timeout(data.len());
        self.transport.write(self.config.address, data, timeout)
    }

    /// Read `len` frame bytes. Every I2C read from the PN532 starts with
    /// a status byte, returned separately.
    fn read_with_status(&mut self, len: usize) -> Result<(u8, Vec<u8>)> {
        let mut buf = vec![0u8; len + 1];
        let timeout = self.config.io_timeout(buf.len());
        self.transport.read(self.config.address, &mut buf, timeout)?;
        dump("read", &buf);
        let status = buf.remove(0);
        Ok((status, buf))
    }

    fn read_frame(&mut self, len: usize) -> Result<Vec<u8>> {
        self.read_with_status(len).map(|(_, frame)| frame)
    }

    /// Poll the status byte until the chip reports data ready.
    fn wait_ready(&mut self) -> Result<()> {
        let policy = self.config.ready;
        let address = self.config.address;
        let timeout = self.config.io_timeout(1);
        let transport = &mut self.transport;
        let ready = policy.poll(&mut *self.clock, || {
            let mut status = [0u8; 1];
            transport.read(address, &mut status, timeout).is_ok()
                && status[0] == PN532_STATUS_READY
        });
        if ready {
            Ok(())
        } else {
            Err(Error::NotReady {
                attempts: policy.attempts,
            })
        }
    }

    fn read_ack(&mut self) -> Result<()> {
        self.wait_ready()?;
        let ack = self.read_frame(PN532_ACK.len())?;
        if ack[..] != PN532_ACK {
            log::debug!("pn532 expected ACK, got {:02x?}", ack);
            return Err(Error::NoAck);
        }
        Ok(())
    }

    fn write_nack(&mut self) -> Result<()> {
        self.bus_write(&PN532_NACK)
    }

    /// Write `cmd` as a chip frame and wait for the ACK.
    pub fn write_command(&mut self, cmd: &ChipCommand) -> Result<()> {
        self.select()?;
        let frame = codec::encode_command_frame(cmd)?;
        self.bus_write(&frame)?;
        self.read_ack()
    }

    /// Read the status byte and frame header to learn the response
    /// length, then NACK so the chip sends the frame again in full.
    fn peek_response_len(&mut self) -> Result<usize> {
        self.wait_ready()?;
        let (status, header) = self.read_with_status(5)?;
        if status != PN532_STATUS_READY {
            return Err(Error::Malformed(format!(
                "status byte {:#04x} on length peek",
                status
            )));
        }
        let len = ChipFrame::declared_len(&header).map_err(malformed)?;
        self.write_nack()?;
        Ok(len)
    }

    /// Read the response to `expected_opcode` and copy its data (after the
    /// `D5 <opcode + 1>` envelope) into `out`. Returns the data length.
    pub fn read_response(&mut self, expected_opcode: u8, out: &mut [u8]) -> Result<usize> {
        self.select()?;
        let len = self.peek_response_len()?;
        self.wait_ready()?;
        if len < 2 {
            return Err(Error::Malformed(format!("response length {} too short", len)));
        }

        let frame = self.read_frame(len + crate::constants::CHIP_MIN_FRAME_LEN)?;
        let payload = ChipFrame::decode(&frame).map_err(malformed)?;
        if payload.len() != len {
            return Err(Error::Malformed(format!(
                "length changed between peek ({}) and read ({})",
                len,
                payload.len()
            )));
        }
        let data = codec::unwrap_response(expected_opcode, &payload).map_err(malformed)?;
        if data.len() > out.len() {
            return Err(Error::Malformed(format!(
                "response data {} exceeds buffer {}",
                data.len(),
                out.len()
            )));
        }
        out[..data.len()].copy_from_slice(&data);
        Ok(data.len())
    }

    /// Send a command and return its response data.
    pub fn exchange(&mut self, cmd: &ChipCommand) -> Result<Vec<u8>> {
        self.write_command(cmd)?;
        let mut buf = [0u8; MAX_RESPONSE_LEN];
        let n = self.read_response(cmd.opcode(), &mut buf)?;
        Ok(buf[..n].to_vec())
    }
}

// libaime/src/host/through.rs

//! Contactless "through" command: a FeliCa command tunnelled inside a
//! host request.
//!
//! Request payload:  IDm(8) len code data...
//! Response payload: len code+1 IDm(8) data...   (len = payload length)

use crate::card::{CardSession, FelicaCard};
use crate::constants::HOST_MAX_PAYLOAD_LEN;
use crate::device::Pn532;
use crate::host::command::{Status, ThroughCode};
use crate::host::dispatch::{EngineState, Reply, Scope, status_for};
use crate::protocol::parser;
use crate::types::{BlockData, ServiceCode, SystemCode};
use crate::{Error, Result};

/// Offset of the sub-command data in the request payload.
const DATA_OFFSET: usize = 10;

/// Response header: len, code, IDm
const RESPONSE_HEADER_LEN: usize = 10;

/// Read reply data header: rw_status(2), block count
const READ_HEADER_LEN: usize = 3;

/// Most blocks a single read reply can carry.
pub const MAX_READ_BLOCKS: usize =
    (HOST_MAX_PAYLOAD_LEN - RESPONSE_HEADER_LEN - READ_HEADER_LEN) / 16;

/// Block-access request: rw IDm(8), service count, service codes (LE),
/// block count, block list elements (2 bytes, BE), then one 16-byte
/// block per element for writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRequest {
    pub services: Vec<ServiceCode>,
    pub blocks: Vec<u16>,
    pub data: Vec<BlockData>,
}

impl BlockRequest {
    pub fn parse(data: &[u8], with_data: bool) -> Result<Self> {
        let service_num = parser::byte_at(data, 8)? as usize;
        let mut pos = 9;
        let mut services = Vec::with_capacity(service_num);
        for _ in 0..service_num {
            services.push(ServiceCode::new(parser::le_u16_at(data, pos)?));
            pos += 2;
        }

        let block_num = parser::byte_at(data, pos)? as usize;
        pos += 1;
        let mut blocks = Vec::with_capacity(block_num);
        for _ in 0..block_num {
            blocks.push(parser::be_u16_at(data, pos)?);
            pos += 2;
        }

        let mut block_data = Vec::new();
        if with_data {
            for _ in 0..block_num {
                block_data.push(BlockData::try_from(parser::slice_at(data, pos, 16)?)?);
                pos += 16;
            }
        }

        Ok(Self {
            services,
            blocks,
            data: block_data,
        })
    }
}

/// Use the cached contactless card, or poll for one. A poll replaces
/// whatever was cached, even when it finds nothing.
fn current_card(chip: &mut Pn532, state: &mut EngineState) -> Result<FelicaCard> {
    if let Some(card) = state.session.as_ref().and_then(CardSession::as_felica) {
        return Ok(*card);
    }
    state.session = None;
    let card = FelicaCard::from(chip.poll_felica(SystemCode::ANY)?);
    state.session = Some(card.into());
    Ok(card)
}

pub fn handle(chip: &mut Pn532, state: &mut EngineState, payload: &[u8]) -> Reply {
    let code = match parser::byte_at(payload, 9) {
        Ok(code) => ThroughCode::from(code),
        Err(e) => return Reply::status(status_for(Scope::Felica, &e)),
    };

    let card = match current_card(chip, state) {
        Ok(card) => card,
        Err(e) => return Reply::status(status_for(Scope::Felica, &e)),
    };

    log::debug!("through {:?} for {}", code, card.idm().to_hex());
    let data = &payload[DATA_OFFSET..];
    let result = match code {
        ThroughCode::Poll => Ok(poll(&card)),
        ThroughCode::SystemCode => Ok(system_code(&card)),
        ThroughCode::Read => read(chip, &card, data),
        ThroughCode::Write => write(chip, &card, data),
        ThroughCode::NdaA4 => Ok(vec![0x00]),
        ThroughCode::Unknown(c) => Err(Error::UnsupportedOperation(format!(
            "through sub-command {:#04x}",
            c
        ))),
    };

    match result {
        Ok(data) => Reply::ok(response_payload(code, &card, &data)),
        Err(e) => Reply::status(status_for(Scope::Felica, &e)),
    }
}

fn response_payload(code: ThroughCode, card: &FelicaCard, data: &[u8]) -> Vec<u8> {
    let len = RESPONSE_HEADER_LEN + data.len();
    let mut payload = Vec::with_capacity(len);
    payload.push(len as u8);
    payload.push(code.code().wrapping_add(1));
    payload.extend_from_slice(card.idm().as_bytes());
    payload.extend_from_slice(data);
    payload
}

fn poll(card: &FelicaCard) -> Vec<u8> {
    let mut data = Vec::with_capacity(10);
    data.extend_from_slice(card.pmm().as_bytes());
    data.extend_from_slice(&card.system_code().to_be_bytes());
    data
}

fn system_code(card: &FelicaCard) -> Vec<u8> {
    let sc = card.system_code().to_be_bytes();
    vec![0x01, sc[0], sc[1]]
}

fn read(chip: &mut Pn532, card: &FelicaCard, data: &[u8]) -> Result<Vec<u8>> {
    let req = BlockRequest::parse(data, false)?;
    if req.blocks.len() > MAX_READ_BLOCKS {
        return Err(Error::ProtocolViolation(format!(
            "{} blocks do not fit one reply",
            req.blocks.len()
        )));
    }
    let blocks = card.read_blocks(chip, &req.services, &req.blocks)?;

    let mut out = Vec::with_capacity(READ_HEADER_LEN + blocks.len() * 16);
    out.extend_from_slice(&[0x00, 0x00, blocks.len() as u8]);
    for block in &blocks {
        out.extend_from_slice(block.as_bytes());
    }
    Ok(out)
}

fn write(chip: &mut Pn532, card: &FelicaCard, data: &[u8]) -> Result<Vec<u8>> {
    let req = BlockRequest::parse(data, true)?;
    let pairs: Vec<(u16, BlockData)> = req.blocks.iter().copied().zip(req.data).collect();
    let outcome = card.write_blocks(chip, &req.services, &pairs)?;
    Ok(if outcome.is_ok() {
        vec![0x00, 0x00]
    } else {
        vec![0x01, 0x01]
    })
}

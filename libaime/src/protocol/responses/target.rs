// libaime/src/protocol/responses/target.rs

use crate::protocol::parser;
use crate::types::{Idm, Pmm, SystemCode, Uid};
use crate::{Error, Result};

/// A type A target listed by InListPassiveTarget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MifareTarget {
    pub tag: u8,
    pub uid: Uid,
}

/// A FeliCa target listed by InListPassiveTarget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FelicaTarget {
    pub tag: u8,
    pub idm: Idm,
    pub pmm: Pmm,
    pub system_code: SystemCode,
}

fn expect_one_target(data: &[u8]) -> Result<()> {
    match parser::byte_at(data, 0)? {
        1 => Ok(()),
        0 => Err(Error::CardAbsent),
        n => Err(Error::Malformed(format!("expected one target, got {}", n))),
    }
}

/// Decode a 106 kbps type A target list.
/// Layout: NbTg(1) Tg(1) SENS_RES(2) SEL_RES(1) NFCIDLength(1) NFCID1(n) [ATS]
pub fn decode_mifare_target(data: &[u8]) -> Result<MifareTarget> {
    expect_one_target(data)?;
    let tag = parser::byte_at(data, 1)?;
    let uid_len = parser::byte_at(data, 5)? as usize;
    let uid = Uid::try_from(parser::slice_at(data, 6, uid_len)?)?;
    Ok(MifareTarget { tag, uid })
}

/// Decode a FeliCa target list.
/// Layout: NbTg(1) Tg(1) POL_RES length(1) 0x01 IDm(8) PMm(8) [SystemCode(2)]
///
/// The system code is only present when the polling request asked for
/// it (request code 1); otherwise the wildcard is recorded.
pub fn decode_felica_target(data: &[u8]) -> Result<FelicaTarget> {
    expect_one_target(data)?;
    let tag = parser::byte_at(data, 1)?;
    let pol_len = parser::byte_at(data, 2)? as usize;
    if pol_len != 18 && pol_len != 20 {
        return Err(Error::Malformed(format!(
            "unexpected polling response length {}",
            pol_len
        )));
    }
    // POL_RES length counts itself, so the body spans pol_len - 1 bytes
    parser::ensure_len(data, 2 + pol_len)?;
    parser::expect_response_code(&data[3..], 0x01)?;

    let idm = parser::idm_at(data, 4)?;
    let pmm = parser::pmm_at(data, 12)?;
    let system_code = if pol_len == 20 {
        SystemCode::new(parser::be_u16_at(data, 20)?)
    } else {
        SystemCode::ANY
    };

    Ok(FelicaTarget {
        tag,
        idm,
        pmm,
        system_code,
    })
}

// libaime/src/card/mod.rs

use crate::device::Pn532;
use crate::protocol::{FelicaTarget, MifareTarget};
use crate::types::{BlockData, CardFamily, Idm, Pmm, ServiceCode, SystemCode, Uid};
use crate::Result;

mod info;
mod keys;
pub use info::CardSummary;
pub use keys::KeySet;

pub mod operations;
pub use operations::WriteOutcome;

/// Tag the chip hands out for the first listed target.
pub const DEFAULT_TARGET_TAG: u8 = 1;

/// A contact-family (MIFARE Classic style) card found by a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MifareCard {
    uid: Uid,
    tag: u8,
}

impl MifareCard {
    pub fn new(uid: Uid, tag: u8) -> Self {
        Self { uid, tag }
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    pub fn tag(&self) -> u8 {
        self.tag
    }
}

impl From<MifareTarget> for MifareCard {
    fn from(t: MifareTarget) -> Self {
        Self::new(t.uid, t.tag)
    }
}

/// A contactless-family (FeliCa style) card found by a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FelicaCard {
    idm: Idm,
    pmm: Pmm,
    system_code: SystemCode,
    tag: u8,
}

impl FelicaCard {
    pub fn new(idm: Idm, pmm: Pmm, system_code: SystemCode, tag: u8) -> Self {
        Self {
            idm,
            pmm,
            system_code,
            tag,
        }
    }

    pub fn idm(&self) -> &Idm {
        &self.idm
    }
    pub fn pmm(&self) -> &Pmm {
        &self.pmm
    }
    pub fn system_code(&self) -> SystemCode {
        self.system_code
    }
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Read blocks of a single service using ReadWithoutEncryption.
    pub fn read_blocks(
        &self,
        device: &mut Pn532,
        services: &[ServiceCode],
        blocks: &[u16],
    ) -> Result<Vec<BlockData>> {
        operations::read_blocks(self, device, services, blocks)
    }

    /// Write blocks of a single service, one WriteWithoutEncryption per
    /// block.
    pub fn write_blocks(
        &self,
        device: &mut Pn532,
        services: &[ServiceCode],
        blocks: &[(u16, BlockData)],
    ) -> Result<WriteOutcome> {
        operations::write_blocks(self, device, services, blocks)
    }
}

impl From<FelicaTarget> for FelicaCard {
    fn from(t: FelicaTarget) -> Self {
        Self::new(t.idm, t.pmm, t.system_code, t.tag)
    }
}

/// The card found by the most recent successful poll. A new poll replaces
/// it outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSession {
    Mifare(MifareCard),
    Felica(FelicaCard),
}

impl CardSession {
    pub fn family(&self) -> CardFamily {
        match self {
            Self::Mifare(_) => CardFamily::Contact,
            Self::Felica(_) => CardFamily::Contactless,
        }
    }

    /// UID for contact cards, IDm for contactless cards.
    pub fn uid_or_idm(&self) -> &[u8] {
        match self {
            Self::Mifare(c) => c.uid.as_bytes(),
            Self::Felica(c) => c.idm.as_bytes(),
        }
    }

    pub fn pmm(&self) -> Option<&Pmm> {
        match self {
            Self::Felica(c) => Some(&c.pmm),
            Self::Mifare(_) => None,
        }
    }

    pub fn system_code(&self) -> Option<SystemCode> {
        match self {
            Self::Felica(c) => Some(c.system_code),
            Self::Mifare(_) => None,
        }
    }

    pub fn tag(&self) -> u8 {
        match self {
            Self::Mifare(c) => c.tag,
            Self::Felica(c) => c.tag,
        }
    }

    pub fn as_mifare(&self) -> Option<&MifareCard> {
        match self {
            Self::Mifare(c) => Some(c),
            Self::Felica(_) => None,
        }
    }

    pub fn as_felica(&self) -> Option<&FelicaCard> {
        match self {
            Self::Felica(c) => Some(c),
            Self::Mifare(_) => None,
        }
    }

    pub fn summary(&self) -> CardSummary {
        CardSummary::from(self)
    }
}

impl From<MifareCard> for CardSession {
    fn from(c: MifareCard) -> Self {
        Self::Mifare(c)
    }
}

impl From<FelicaCard> for CardSession {
    fn from(c: FelicaCard) -> Self {
        Self::Felica(c)
    }
}

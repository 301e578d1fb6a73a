// libaime/src/host/command.rs

//! Host command table, through sub-codes and reply status codes.

use crate::constants::{
    FELICA_CMD_POLLING, FELICA_CMD_READ_WITHOUT_ENCRYPTION, FELICA_CMD_WRITE_WITHOUT_ENCRYPTION,
};
use crate::types::KeySlot;
use crate::Error;

/// Reply status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Status {
    Ok,
    InitError,
    FirmwareUpToDate,
    AccessError,
    DetectTimeout,
    DetectError,
    ContactlessError,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::InitError => 1,
            Self::FirmwareUpToDate => 3,
            Self::AccessError => 4,
            Self::DetectTimeout => 5,
            Self::DetectError => 32,
            Self::ContactlessError => 33,
        }
    }
}

impl From<Status> for u8 {
    fn from(s: Status) -> u8 {
        s.code()
    }
}

impl TryFrom<u8> for Status {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Ok,
            1 => Self::InitError,
            3 => Self::FirmwareUpToDate,
            4 => Self::AccessError,
            5 => Self::DetectTimeout,
            32 => Self::DetectError,
            33 => Self::ContactlessError,
            other => {
                return Err(Error::FrameFormat(format!(
                    "unknown status code {:#04x}",
                    other
                )));
            }
        })
    }
}

/// Sub-command carried by the through command (FeliCa command codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThroughCode {
    Poll,
    Read,
    Write,
    SystemCode,
    NdaA4,
    Unknown(u8),
}

impl ThroughCode {
    pub fn code(self) -> u8 {
        match self {
            Self::Poll => FELICA_CMD_POLLING,
            Self::Read => FELICA_CMD_READ_WITHOUT_ENCRYPTION,
            Self::Write => FELICA_CMD_WRITE_WITHOUT_ENCRYPTION,
            Self::SystemCode => 0x0c,
            Self::NdaA4 => 0xa4,
            Self::Unknown(c) => c,
        }
    }
}

impl From<u8> for ThroughCode {
    fn from(code: u8) -> Self {
        match code {
            FELICA_CMD_POLLING => Self::Poll,
            FELICA_CMD_READ_WITHOUT_ENCRYPTION => Self::Read,
            FELICA_CMD_WRITE_WITHOUT_ENCRYPTION => Self::Write,
            0x0c => Self::SystemCode,
            0xa4 => Self::NdaA4,
            other => Self::Unknown(other),
        }
    }
}

/// Host command, decoded from the frame's command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    GetFirmwareVersion,
    GetHardwareVersion,
    StartPolling,
    StopPolling,
    CardDetect,
    CardSelect,
    CardHalt,
    SetKey(KeySlot),
    Authenticate(KeySlot),
    MifareRead,
    MifareWrite,
    ToUpdaterMode,
    SendHexData,
    ToNormalMode,
    SendBindataInit,
    SendBindataExec,
    FelicaPush,
    FelicaThrough,
    LedReset,
    LedSetRgb,
    LedSetRgbAlt,
    LedBoardInfo,
    LedFirmwareSum,
    LedSendHexData,
    LedToBootMode,
    LedToNormalMode,
    Unknown(u8),
}

impl HostCommand {
    pub fn code(self) -> u8 {
        match self {
            Self::GetFirmwareVersion => 0x30,
            Self::GetHardwareVersion => 0x32,
            Self::StartPolling => 0x40,
            Self::StopPolling => 0x41,
            Self::CardDetect => 0x42,
            Self::CardSelect => 0x43,
            Self::CardHalt => 0x44,
            Self::SetKey(KeySlot::A) => 0x50,
            Self::Authenticate(KeySlot::A) => 0x51,
            Self::MifareRead => 0x52,
            Self::MifareWrite => 0x53,
            Self::SetKey(KeySlot::B) => 0x54,
            Self::Authenticate(KeySlot::B) => 0x55,
            Self::ToUpdaterMode => 0x60,
            Self::SendHexData => 0x61,
            Self::ToNormalMode => 0x62,
            Self::SendBindataInit => 0x63,
            Self::SendBindataExec => 0x64,
            Self::FelicaPush => 0x70,
            Self::FelicaThrough => 0x71,
            Self::LedReset => 0x80,
            Self::LedSetRgb => 0x81,
            Self::LedSetRgbAlt => 0x82,
            Self::LedBoardInfo => 0xf0,
            Self::LedFirmwareSum => 0xf2,
            Self::LedSendHexData => 0xf3,
            Self::LedToBootMode => 0xf4,
            Self::LedToNormalMode => 0xf5,
            Self::Unknown(c) => c,
        }
    }
}

impl From<u8> for HostCommand {
    fn from(code: u8) -> Self {
        match code {
            0x30 => Self::GetFirmwareVersion,
            0x32 => Self::GetHardwareVersion,
            0x40 => Self::StartPolling,
            0x41 => Self::StopPolling,
            0x42 => Self::CardDetect,
            0x43 => Self::CardSelect,
            0x44 => Self::CardHalt,
            0x50 => Self::SetKey(KeySlot::A),
            0x51 => Self::Authenticate(KeySlot::A),
            0x52 => Self::MifareRead,
            0x53 => Self::MifareWrite,
            0x54 => Self::SetKey(KeySlot::B),
            0x55 => Self::Authenticate(KeySlot::B),
            0x60 => Self::ToUpdaterMode,
            0x61 => Self::SendHexData,
            0x62 => Self::ToNormalMode,
            0x63 => Self::SendBindataInit,
            0x64 => Self::SendBindataExec,
            0x70 => Self::FelicaPush,
            0x71 => Self::FelicaThrough,
            0x80 => Self::LedReset,
            0x81 => Self::LedSetRgb,
            0x82 => Self::LedSetRgbAlt,
            0xf0 => Self::LedBoardInfo,
            0xf2 => Self::LedFirmwareSum,
            0xf3 => Self::LedSendHexData,
            0xf4 => Self::LedToBootMode,
            0xf5 => Self::LedToNormalMode,
            other => Self::Unknown(other),
        }
    }
}

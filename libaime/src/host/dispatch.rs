// libaime/src/host/dispatch.rs

//! Host command handlers. Every handler turns a request into a reply
//! status and payload; chip and card errors stop here.

use crate::card::{CardSession, DEFAULT_TARGET_TAG, FelicaCard, KeySet, MifareCard};
use crate::config::EngineConfig;
use crate::device::Pn532;
use crate::host::command::{HostCommand, Status};
use crate::host::frame::HostFrame;
use crate::host::through;
use crate::types::{BaudMode, BlockData, CardFamily, MifareKey, SystemCode, Uid};
use crate::Error;

const FIRMWARE_VERSION: [&[u8]; 2] = [b"TN32MSEC003S F/W Ver1.2", b"\x94"];
const HARDWARE_VERSION: [&[u8]; 2] = [b"TN32MSEC003S H/W Ver3.0", b"837-15396"];
const LED_BOARD_INFO: [&[u8]; 2] = [b"15084\xff\x10\x00\x12", b"000-00000\xff\x11\x40"];

/// State that outlives a single command.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    /// Card found by the most recent successful poll
    pub session: Option<CardSession>,
    pub keys: KeySet,
    /// 24-bit RGB set by the host
    pub led_color: u32,
    pub config: EngineConfig,
}

impl EngineState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Tag for follow-on contact commands, defaulting to the first target.
    fn mifare_tag(&self) -> u8 {
        self.session
            .as_ref()
            .and_then(CardSession::as_mifare)
            .map_or(DEFAULT_TARGET_TAG, MifareCard::tag)
    }
}

/// Reply status and payload for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: Status,
    pub payload: Vec<u8>,
}

impl Reply {
    pub fn ok(payload: Vec<u8>) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    pub fn empty() -> Self {
        Self::ok(Vec::new())
    }

    pub fn status(status: Status) -> Self {
        Self {
            status,
            payload: Vec::new(),
        }
    }
}

/// Which command family raised an error; picks the reply status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Mifare,
    Felica,
    Firmware,
}

/// Map a failure to the reply status for its command family.
pub fn status_for(scope: Scope, err: &Error) -> Status {
    if err.is_chip_error() {
        log::warn!("{:?} command failed on chip: {}", scope, err);
    } else {
        log::debug!("{:?} command failed: {}", scope, err);
    }
    match scope {
        Scope::Mifare => Status::AccessError,
        Scope::Felica => Status::ContactlessError,
        Scope::Firmware => Status::InitError,
    }
}

fn canned(table: &[&'static [u8]; 2], mode: BaudMode) -> Reply {
    let text = match mode {
        BaudMode::Standard => table[0],
        BaudMode::High => table[1],
    };
    Reply::ok(text.to_vec())
}

/// Run the handler for `request`.
pub fn dispatch(chip: &mut Pn532, state: &mut EngineState, request: &HostFrame) -> Reply {
    let command = HostCommand::from(request.command);
    log::debug!("host command {:?} ({:#04x})", command, request.command);

    match command {
        HostCommand::GetFirmwareVersion => canned(&FIRMWARE_VERSION, state.config.baud_mode),
        HostCommand::GetHardwareVersion => canned(&HARDWARE_VERSION, state.config.baud_mode),
        HostCommand::LedBoardInfo => canned(&LED_BOARD_INFO, state.config.baud_mode),
        HostCommand::StartPolling => set_polling(chip, true),
        HostCommand::StopPolling => set_polling(chip, false),
        HostCommand::CardDetect => detect_card(chip, state),
        HostCommand::CardSelect | HostCommand::CardHalt => Reply::empty(),
        HostCommand::SetKey(slot) => match MifareKey::try_from(request.payload.get(..6).unwrap_or(&[])) {
            Ok(key) => {
                state.keys.set(slot, key);
                Reply::empty()
            }
            Err(e) => Reply::status(status_for(Scope::Mifare, &e)),
        },
        HostCommand::Authenticate(slot) => match mifare_address(&request.payload) {
            Ok((uid, block)) => {
                let key = *state.keys.get(slot);
                match chip.mifare_auth(state.mifare_tag(), slot, block, &key, &uid) {
                    Ok(()) => Reply::empty(),
                    Err(e) => Reply::status(status_for(Scope::Mifare, &e)),
                }
            }
            Err(e) => Reply::status(status_for(Scope::Mifare, &e)),
        },
        HostCommand::MifareRead => {
            let read = mifare_address(&request.payload)
                .and_then(|(_, block)| chip.mifare_read(state.mifare_tag(), block));
            match read {
                Ok(data) => Reply::ok(data.as_bytes().to_vec()),
                Err(e) => Reply::status(status_for(Scope::Mifare, &e)),
            }
        }
        HostCommand::MifareWrite => {
            let write = mifare_address(&request.payload).and_then(|(_, block)| {
                let data = BlockData::try_from(request.payload.get(5..21).unwrap_or(&[]))?;
                chip.mifare_write(state.mifare_tag(), block, &data)
            });
            match write {
                Ok(()) => Reply::empty(),
                Err(e) => Reply::status(status_for(Scope::Mifare, &e)),
            }
        }
        HostCommand::ToNormalMode => match chip.firmware_version() {
            Ok(version) => {
                log::info!("reader chip firmware {:08x}", version);
                Reply::status(Status::FirmwareUpToDate)
            }
            Err(e) => Reply::status(status_for(Scope::Firmware, &e)),
        },
        HostCommand::LedSetRgb => {
            if let [r, g, b, ..] = request.payload[..] {
                state.led_color = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
            } else {
                log::debug!("LED color request too short: {} bytes", request.payload.len());
            }
            Reply::empty()
        }
        HostCommand::FelicaThrough => through::handle(chip, state, &request.payload),
        HostCommand::SendHexData | HostCommand::LedToNormalMode => Reply::empty(),
        HostCommand::ToUpdaterMode
        | HostCommand::SendBindataInit
        | HostCommand::SendBindataExec
        | HostCommand::FelicaPush
        | HostCommand::LedReset
        | HostCommand::LedSetRgbAlt
        | HostCommand::LedFirmwareSum
        | HostCommand::LedSendHexData
        | HostCommand::LedToBootMode => {
            log::debug!("host command {:?} accepted without action", command);
            Reply::empty()
        }
        HostCommand::Unknown(code) => {
            log::warn!(
                "unknown host command {:#04x}, payload {}",
                code,
                crate::utils::bytes_to_hex_spaced(&request.payload)
            );
            Reply::empty()
        }
    }
}

fn set_polling(chip: &mut Pn532, on: bool) -> Reply {
    if let Err(e) = chip.set_rf_field(on) {
        log::warn!("RF field {} failed: {}", if on { "on" } else { "off" }, e);
    }
    Reply::empty()
}

/// Contact request addressing: UID(4) then block number.
fn mifare_address(payload: &[u8]) -> crate::Result<(Uid, u8)> {
    let uid = Uid::try_from(payload.get(..4).unwrap_or(&[]))?;
    let block = *payload.get(4).ok_or(Error::InvalidLength {
        expected: 5,
        actual: payload.len(),
    })?;
    Ok((uid, block))
}

/// Poll contact first, then contactless. Any attempt replaces the cached
/// session.
fn detect_card(chip: &mut Pn532, state: &mut EngineState) -> Reply {
    state.session = None;

    match chip.poll_mifare() {
        Ok(target) => {
            let card = MifareCard::from(target);
            log::info!("contact card detected: {}", card.uid().to_hex());
            state.session = Some(card.into());
            return Reply::ok(contact_detect_payload(card.uid()));
        }
        Err(e) => log::debug!("contact poll: {}", e),
    }

    match chip.poll_felica(SystemCode::ANY) {
        Ok(target) => {
            let card = FelicaCard::from(target);
            log::info!("contactless card detected: {}", card.idm().to_hex());
            state.session = Some(card.into());
            Reply::ok(contactless_detect_payload(&card))
        }
        Err(e) => {
            log::debug!("contactless poll: {}", e);
            Reply::ok(vec![0x00])
        }
    }
}

/// count, type, id_len, then the UID in a 4-byte or 7-byte field. A
/// 10-byte UID keeps its id_len but only its first 7 bytes fit.
fn contact_detect_payload(uid: &Uid) -> Vec<u8> {
    let field = if uid.len() > 4 { 7 } else { 4 };
    let mut payload = vec![1, CardFamily::Contact.type_code(), uid.len() as u8];
    let bytes = uid.as_bytes();
    let n = bytes.len().min(field);
    payload.extend_from_slice(&bytes[..n]);
    payload.resize(3 + field, 0);
    payload
}

/// count, type, id_len (16), IDm, PMm
fn contactless_detect_payload(card: &FelicaCard) -> Vec<u8> {
    let mut payload = vec![1, CardFamily::Contactless.type_code(), 16];
    payload.extend_from_slice(card.idm().as_bytes());
    payload.extend_from_slice(card.pmm().as_bytes());
    payload
}

// libaime/src/protocol/commands/target.rs

use crate::constants::FELICA_CMD_POLLING;
use crate::types::SystemCode;

/// BrTy values for InListPassiveTarget
const BRTY_106_TYPE_A: u8 = 0x00;
const BRTY_212_FELICA: u8 = 0x01;

/// InListPassiveTarget parameters for one 106 kbps type A target.
pub fn encode_list_mifare() -> Vec<u8> {
    vec![0x01, BRTY_106_TYPE_A]
}

/// InListPassiveTarget parameters for one FeliCa target. The initiator
/// data is a complete FeliCa polling request without its length byte.
pub fn encode_list_felica(system_code: SystemCode, request_code: u8, time_slot: u8) -> Vec<u8> {
    let mut buf = vec![0x01, BRTY_212_FELICA, FELICA_CMD_POLLING];
    buf.extend_from_slice(&system_code.to_be_bytes());
    buf.push(request_code);
    buf.push(time_slot);
    buf
}

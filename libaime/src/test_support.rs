//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup so tests across the
//! crate and tests/ directory can reuse the same chip conversations.
#![allow(dead_code)]

use crate::config::{ChipConfig, EngineConfig};
use crate::constants::PN532_CMD_PREFIX_DEVICE;
use crate::device::Pn532;
use crate::host::ProtocolEngine;
use crate::transport::{MockClock, MockHostPort, MockTransport};

/// Queue one complete chip conversation on `mock`: the ACK for the
/// command, then a response to `opcode` carrying `data`.
#[doc(hidden)]
pub fn seed_exchange(mock: &MockTransport, opcode: u8, data: &[u8]) {
    let mut payload = Vec::with_capacity(2 + data.len());
    payload.push(PN532_CMD_PREFIX_DEVICE);
    payload.push(opcode.wrapping_add(1));
    payload.extend_from_slice(data);
    mock.push_ack();
    // payloads built here always fit a frame
    let _ = mock.push_response(&payload);
}

/// InListPassiveTarget data for one type A target with `uid`.
#[doc(hidden)]
pub fn mifare_target(uid: &[u8]) -> Vec<u8> {
    let mut data = vec![0x01, 0x01, 0x00, 0x04, 0x08, uid.len() as u8];
    data.extend_from_slice(uid);
    data
}

/// InListPassiveTarget data for one FeliCa target that reported its
/// system code.
#[doc(hidden)]
pub fn felica_target(idm: &[u8; 8], pmm: &[u8; 8], system_code: [u8; 2]) -> Vec<u8> {
    let mut data = vec![0x01, 0x01, 20, 0x01];
    data.extend_from_slice(idm);
    data.extend_from_slice(pmm);
    data.extend_from_slice(&system_code);
    data
}

/// InDataExchange data for a successful single-block FeliCa read.
#[doc(hidden)]
pub fn felica_read_response(idm: &[u8; 8], block: [u8; 16]) -> Vec<u8> {
    let mut inner = vec![0x07];
    inner.extend_from_slice(idm);
    inner.extend_from_slice(&[0x00, 0x00, 0x01]);
    inner.extend_from_slice(&block);
    wrap_felica(&inner)
}

/// InDataExchange data for a FeliCa write with the given status flags.
#[doc(hidden)]
pub fn felica_write_response(idm: &[u8; 8], status: [u8; 2]) -> Vec<u8> {
    let mut inner = vec![0x09];
    inner.extend_from_slice(idm);
    inner.extend_from_slice(&status);
    wrap_felica(&inner)
}

fn wrap_felica(inner: &[u8]) -> Vec<u8> {
    let mut data = vec![0x00, (inner.len() + 1) as u8];
    data.extend_from_slice(inner);
    data
}

/// Mocks wired into an engine. The mocks share state with the engine's
/// copies, so tests seed and inspect them directly.
#[doc(hidden)]
pub struct EngineFixture {
    pub bus: MockTransport,
    pub clock: MockClock,
    pub port: MockHostPort,
    pub engine: ProtocolEngine,
}

impl EngineFixture {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let bus = MockTransport::new();
        let clock = MockClock::new();
        let port = MockHostPort::new();
        let chip = Pn532::new(
            Box::new(bus.clone()),
            Box::new(clock.clone()),
            ChipConfig::default(),
        );
        let engine = ProtocolEngine::new(chip, Box::new(port.clone()), config);
        Self {
            bus,
            clock,
            port,
            engine,
        }
    }

    /// Feed raw host bytes and run one tick at the mock clock's time.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.port.push_input(bytes);
        let now = self.clock.now();
        self.engine.tick(now);
    }
}

impl Default for EngineFixture {
    fn default() -> Self {
        Self::new()
    }
}

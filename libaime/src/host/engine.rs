// libaime/src/host/engine.rs

use crate::card::{CardSession, CardSummary};
use crate::config::EngineConfig;
use crate::device::Pn532;
use crate::host::codec::HostFrameCodec;
use crate::host::dispatch::{EngineState, dispatch};
use crate::host::frame::{FrameKind, HostFrame};
use crate::transport::HostPort;
use crate::types::BaudMode;
use crate::{Error, Result};

/// Bytes pulled from the host port per read.
const READ_CHUNK: usize = 32;

/// Single owner of the codec, the card session, the keys and the chip.
/// Driven from the main loop by [`ProtocolEngine::tick`].
pub struct ProtocolEngine {
    codec: HostFrameCodec,
    state: EngineState,
    chip: Pn532,
    port: Box<dyn HostPort>,
}

impl ProtocolEngine {
    pub fn new(chip: Pn532, port: Box<dyn HostPort>, config: EngineConfig) -> Self {
        Self {
            codec: HostFrameCodec::new(FrameKind::Request, config.frame_timeout),
            state: EngineState::new(config),
            chip,
            port,
        }
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Expire a stale partial frame, drain the host port and answer every
    /// completed request.
    pub fn tick(&mut self, now_us: u64) {
        self.codec.poll_timeout(now_us);

        let mut buf = [0u8; READ_CHUNK];
        loop {
            let n = match self.port.read_available(&mut buf) {
                Ok(n) => n,
                Err(e) => {
                    log::warn!("host port read failed: {}", e);
                    return;
                }
            };
            if n == 0 {
                return;
            }
            for &byte in &buf[..n] {
                if let Some(request) = self.codec.feed(byte, now_us) {
                    let response = self.handle_frame(&request);
                    if let Err(e) = self.send(&response) {
                        log::warn!("host response not sent: {}", e);
                    }
                }
            }
        }
    }

    /// Run one request through the dispatcher and build the response.
    pub fn handle_frame(&mut self, request: &HostFrame) -> HostFrame {
        let reply = dispatch(&mut self.chip, &mut self.state, request);
        if reply.status != crate::host::Status::Ok {
            log::debug!(
                "host command {:#04x} replied {}",
                request.command,
                reply.status
            );
        }
        HostFrame::reply_to(request, reply.status.code(), reply.payload)
    }

    fn send(&mut self, frame: &HostFrame) -> Result<()> {
        let wire = HostFrameCodec::encode(frame)?;
        #[cfg(feature = "diagnostics")]
        log::trace!("host tx: {}", crate::utils::bytes_to_hex_spaced(&wire));
        self.port.write_all(&wire)?;
        self.port.flush()
    }

    /// 24-bit RGB color last set by the host.
    pub fn led_color(&self) -> u32 {
        self.state.led_color
    }

    pub fn session(&self) -> Option<&CardSession> {
        self.state.session.as_ref()
    }

    /// Summary of the card found by the last successful poll.
    pub fn current_card(&self) -> Option<CardSummary> {
        self.state.session.as_ref().map(CardSummary::from)
    }

    pub fn baud_mode(&self) -> BaudMode {
        self.state.config.baud_mode
    }

    /// Selects the canned identity strings; set by the platform when the
    /// host changes line speed.
    pub fn set_baud_mode(&mut self, mode: BaudMode) {
        self.state.config.baud_mode = mode;
    }

    pub fn chip_mut(&mut self) -> &mut Pn532 {
        &mut self.chip
    }
}

/// Helper to construct a ProtocolEngine with optional configuration.
pub struct EngineBuilder {
    chip: Option<Pn532>,
    port: Option<Box<dyn HostPort>>,
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            chip: None,
            port: None,
            config: EngineConfig::default(),
        }
    }

    pub fn chip(mut self, chip: Pn532) -> Self {
        self.chip = Some(chip);
        self
    }

    pub fn port(mut self, port: Box<dyn HostPort>) -> Self {
        self.port = Some(port);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn baud_mode(mut self, mode: BaudMode) -> Self {
        self.config.baud_mode = mode;
        self
    }

    /// Build the engine and configure the chip. A chip that fails to
    /// configure is logged and kept: card commands then report no card
    /// while identity and LED commands still answer.
    pub fn build(self) -> Result<ProtocolEngine> {
        let mut chip = self.chip.ok_or(Error::DeviceNotFound)?;
        let port = self
            .port
            .ok_or_else(|| Error::UnsupportedOperation("no host port configured".into()))?;
        if let Err(e) = chip.initialize() {
            log::warn!("reader chip initialization failed: {}", e);
        }
        Ok(ProtocolEngine::new(chip, port, self.config))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

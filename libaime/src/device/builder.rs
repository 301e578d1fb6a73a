// libaime/src/device/builder.rs

use crate::config::ChipConfig;
use crate::device::handle::Pn532;
use crate::transport::{Clock, SystemClock, Transport};
use crate::utils::RetryPolicy;
use crate::{Error, Result};

/// Helper to construct a Pn532 with optional configuration.
pub struct Pn532Builder {
    transport: Option<Box<dyn Transport>>,
    clock: Option<Box<dyn Clock>>,
    config: ChipConfig,
}

impl Pn532Builder {
    pub fn new() -> Self {
        Self {
            transport: None,
            clock: None,
            config: ChipConfig::default(),
        }
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Defaults to `SystemClock` when not given.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn config(mut self, config: ChipConfig) -> Self {
        self.config = config;
        self
    }

    pub fn address(mut self, address: u8) -> Self {
        self.config.address = address;
        self
    }

    pub fn channel(mut self, channel: u8) -> Self {
        self.config.channel = channel;
        self
    }

    pub fn ready_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.ready = policy;
        self
    }

    /// Consume the builder and return an uninitialized Pn532.
    /// Requires a transport to be provided; otherwise returns DeviceNotFound.
    pub fn build(self) -> Result<Pn532> {
        let transport = self.transport.ok_or(Error::DeviceNotFound)?;
        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(SystemClock::new()));
        Ok(Pn532::new(transport, clock, self.config))
    }
}

impl Default for Pn532Builder {
    fn default() -> Self {
        Self::new()
    }
}

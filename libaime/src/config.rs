// libaime/src/config.rs

//! Runtime configuration for the chip link and the host engine. Values
//! are held in memory only; persisting them is the platform's concern.

use std::time::Duration;

use crate::constants::{HOST_FRAME_TIMEOUT_US, PN532_I2C_ADDRESS};
use crate::types::BaudMode;
use crate::utils::{RetryPolicy, us};

/// Bus multiplexer channel the reader chip sits on.
pub const DEFAULT_CHIP_CHANNEL: u8 = 5;

/// Per-byte allowance for a single bus transfer (1 ms).
pub const DEFAULT_IO_TIMEOUT_PER_BYTE: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChipConfig {
    /// 7-bit bus address
    pub address: u8,
    /// Multiplexer channel selected before every chip interaction
    pub channel: u8,
    /// Status polling before every read
    pub ready: RetryPolicy,
    /// A transfer of n bytes may take n times this long
    pub io_timeout_per_byte: Duration,
}

impl ChipConfig {
    /// Time budget for a transfer of `len` bytes.
    pub fn io_timeout(&self, len: usize) -> Duration {
        self.io_timeout_per_byte
            .saturating_mul(u32::try_from(len.max(1)).unwrap_or(u32::MAX))
    }
}

impl Default for ChipConfig {
    fn default() -> Self {
        Self {
            address: PN532_I2C_ADDRESS,
            channel: DEFAULT_CHIP_CHANNEL,
            ready: RetryPolicy::default(),
            io_timeout_per_byte: DEFAULT_IO_TIMEOUT_PER_BYTE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Selects which canned identity strings are reported
    pub baud_mode: BaudMode,
    /// A frame must complete this long after its sync byte
    pub frame_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            baud_mode: BaudMode::Standard,
            frame_timeout: us(HOST_FRAME_TIMEOUT_US),
        }
    }
}

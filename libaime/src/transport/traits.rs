// libaime/src/transport/traits.rs

use std::time::Duration;

use crate::Result;

/// Register-style bus the reader chip hangs off (I2C behind a channel
/// multiplexer). Abstracts I/O away from protocol/device logic.
pub trait Transport {
    /// Route the shared bus to `channel`. Other drivers may move the
    /// multiplexer between ticks, so callers reselect before every
    /// chip interaction.
    fn select_channel(&mut self, channel: u8) -> Result<()>;

    /// Write raw bytes to the device at `address`, giving up after
    /// `timeout`.
    fn write(&mut self, address: u8, data: &[u8], timeout: Duration) -> Result<()>;

    /// Fill `buf` from the device at `address`, giving up after `timeout`.
    fn read(&mut self, address: u8, buf: &mut [u8], timeout: Duration) -> Result<()>;
}

/// Monotonic microsecond clock supplied by the platform layer.
pub trait Clock {
    fn now_us(&self) -> u64;

    fn sleep(&mut self, duration: Duration);
}

/// Byte stream to the host (a virtual serial channel).
pub trait HostPort {
    /// Copy whatever bytes are available into `buf` without blocking.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Queue bytes for transmission.
    fn write_all(&mut self, data: &[u8]) -> Result<()>;

    /// Push queued bytes out. Default is a no-op for unbuffered ports.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

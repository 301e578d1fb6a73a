// libaime/src/transport/mock.rs

//! Test doubles for the bus, the clock and the host port. Each mock keeps
//! its state behind an `Rc`, so a test can keep a clone for assertions
//! after handing the original to a device or engine.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::constants::{PN532_ACK, PN532_STATUS_READY};
use crate::protocol::ChipFrame;
use crate::transport::traits::{Clock, HostPort, Transport};
use crate::{Error, Result};

#[derive(Debug, Default)]
struct BusState {
    /// (address, bytes) for every write
    writes: Vec<(u8, Vec<u8>)>,
    /// Queued read results, consumed one per `read` call
    reads: VecDeque<Vec<u8>>,
    read_calls: usize,
    selects: Vec<u8>,
    /// Testing hook: number of upcoming writes that fail with Timeout
    write_failures: usize,
}

/// Mock bus for unit tests. It records writes and returns queued reads.
/// A read with nothing queued fails with `Timeout`.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<BusState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the bytes returned by the next read. Shorter data is padded
    /// with zeros, longer data is truncated to the read size.
    pub fn push_read(&self, data: Vec<u8>) {
        self.state.borrow_mut().reads.push_back(data);
    }

    /// Queue a ready status poll followed by a status-prefixed read of
    /// `frame`, which is what the PN532 returns over I2C.
    pub fn push_ready_frame(&self, frame: &[u8]) {
        self.push_read(vec![PN532_STATUS_READY]);
        let mut data = Vec::with_capacity(frame.len() + 1);
        data.push(PN532_STATUS_READY);
        data.extend_from_slice(frame);
        self.push_read(data);
    }

    /// Queue the ACK that follows every accepted command frame.
    pub fn push_ack(&self) {
        self.push_ready_frame(&PN532_ACK);
    }

    /// Queue a complete chip response for `payload` (direction byte
    /// included): the length peek followed by the full frame.
    pub fn push_response(&self, payload: &[u8]) -> Result<()> {
        let frame = ChipFrame::encode(payload)?;
        self.push_ready_frame(&frame[..5]);
        self.push_ready_frame(&frame);
        Ok(())
    }

    /// Make the next `n` writes fail (for tests).
    pub fn set_write_failures(&self, n: usize) {
        self.state.borrow_mut().write_failures = n;
    }

    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.state.borrow().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.state.borrow().writes.len()
    }

    pub fn read_count(&self) -> usize {
        self.state.borrow().read_calls
    }

    pub fn selects(&self) -> Vec<u8> {
        self.state.borrow().selects.clone()
    }

    pub fn pending_reads(&self) -> usize {
        self.state.borrow().reads.len()
    }

    /// Total bus operations so far (writes and reads).
    pub fn traffic(&self) -> usize {
        let s = self.state.borrow();
        s.writes.len() + s.read_calls
    }
}

impl Transport for MockTransport {
    fn select_channel(&mut self, channel: u8) -> Result<()> {
        self.state.borrow_mut().selects.push(channel);
        Ok(())
    }

    fn write(&mut self, address: u8, data: &[u8], _timeout: Duration) -> Result<()> {
        let mut s = self.state.borrow_mut();
        if s.write_failures > 0 {
            s.write_failures -= 1;
            return Err(Error::Timeout);
        }
        s.writes.push((address, data.to_vec()));
        Ok(())
    }

    fn read(&mut self, _address: u8, buf: &mut [u8], _timeout: Duration) -> Result<()> {
        let mut s = self.state.borrow_mut();
        s.read_calls += 1;
        let data = s.reads.pop_front().ok_or(Error::Timeout)?;
        buf.fill(0);
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        Ok(())
    }
}

/// Manually driven clock. `sleep` advances time instantly.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now_us: Rc<Cell<u64>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now_us.get()
    }

    pub fn advance(&self, duration: Duration) {
        let us = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        self.now_us.set(self.now_us.get().saturating_add(us));
    }
}

impl Clock for MockClock {
    fn now_us(&self) -> u64 {
        self.now()
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

#[derive(Debug, Default)]
struct PortState {
    input: VecDeque<u8>,
    output: Vec<u8>,
    flushes: usize,
}

/// In-memory host port: tests push request bytes in and take response
/// bytes out.
#[derive(Debug, Clone, Default)]
pub struct MockHostPort {
    state: Rc<RefCell<PortState>>,
}

impl MockHostPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_input(&self, bytes: &[u8]) {
        self.state.borrow_mut().input.extend(bytes.iter().copied());
    }

    /// Drain everything written so far.
    pub fn take_output(&self) -> Vec<u8> {
        std::mem::take(&mut self.state.borrow_mut().output)
    }

    pub fn flush_count(&self) -> usize {
        self.state.borrow().flushes
    }
}

impl HostPort for MockHostPort {
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut s = self.state.borrow_mut();
        let n = s.input.len().min(buf.len());
        for (slot, byte) in buf.iter_mut().zip(s.input.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.state.borrow_mut().output.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.state.borrow_mut().flushes += 1;
        Ok(())
    }
}

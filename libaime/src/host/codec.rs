// libaime/src/host/codec.rs

//! Byte-at-a-time host frame assembler and the matching serializer.
//!
//! Wire form: `E0 <body, escaped> <checksum>`. Inside the body `E0` and
//! `D0` are sent as `D0 <byte - 1>`. The checksum is the additive sum of
//! the unescaped body and is sent as-is, so a checksum of `E0` or `D0`
//! cannot be received intact.

use std::time::Duration;

use crate::constants::{HOST_ESCAPE, HOST_SYNC};
use crate::host::frame::{FrameKind, HostFrame};
use crate::protocol::checksum::sum;
use crate::utils::{Deadline, us};
use crate::Result;

#[derive(Debug)]
enum State {
    Idle,
    Collecting {
        buf: Vec<u8>,
        checksum: u8,
        escape_pending: bool,
        deadline: Deadline,
    },
}

#[derive(Debug)]
pub struct HostFrameCodec {
    kind: FrameKind,
    window: Duration,
    state: State,
}

impl HostFrameCodec {
    pub fn new(kind: FrameKind, window: Duration) -> Self {
        Self {
            kind,
            window,
            state: State::Idle,
        }
    }

    /// Device side: assemble host requests.
    pub fn for_requests() -> Self {
        Self::new(
            FrameKind::Request,
            us(crate::constants::HOST_FRAME_TIMEOUT_US),
        )
    }

    /// Host side: assemble device responses.
    pub fn for_responses() -> Self {
        Self::new(
            FrameKind::Response,
            us(crate::constants::HOST_FRAME_TIMEOUT_US),
        )
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Idle)
    }

    /// Drop an in-progress frame whose window has passed. Returns true if
    /// a frame was dropped.
    pub fn poll_timeout(&mut self, now_us: u64) -> bool {
        if let State::Collecting { deadline, buf, .. } = &self.state {
            if deadline.is_expired(now_us) {
                log::debug!("host frame timed out after {} bytes", buf.len());
                self.state = State::Idle;
                return true;
            }
        }
        false
    }

    /// Feed one received byte. Returns a frame once its checksum trailer
    /// has arrived and matched.
    pub fn feed(&mut self, byte: u8, now_us: u64) -> Option<HostFrame> {
        if byte == HOST_SYNC {
            if !self.is_idle() {
                log::debug!("host frame restarted by sync byte");
            }
            self.state = State::Collecting {
                buf: Vec::with_capacity(32),
                checksum: 0,
                escape_pending: false,
                deadline: Deadline::after(now_us, self.window),
            };
            return None;
        }

        self.poll_timeout(now_us);

        let min_len = self.kind.header_len();
        let State::Collecting {
            buf,
            checksum,
            escape_pending,
            ..
        } = &mut self.state
        else {
            return None;
        };

        if byte == HOST_ESCAPE {
            *escape_pending = true;
            return None;
        }
        let byte = if *escape_pending {
            *escape_pending = false;
            byte.wrapping_add(1)
        } else {
            byte
        };

        // Length byte counts itself, so the trailer follows once the
        // collected bytes reach it.
        if !buf.is_empty() && buf.len() == buf[0] as usize {
            let result = if *checksum == byte {
                match HostFrame::parse(self.kind, buf) {
                    Ok(frame) => Some(frame),
                    Err(e) => {
                        log::debug!("host frame dropped: {}", e);
                        None
                    }
                }
            } else {
                log::debug!(
                    "host frame checksum mismatch: computed {:#04x}, received {:#04x}",
                    checksum,
                    byte
                );
                None
            };
            self.state = State::Idle;
            return result;
        }

        buf.push(byte);
        *checksum = checksum.wrapping_add(byte);

        if buf.len() == 1 && (byte as usize) < min_len {
            log::debug!("host frame declared length {} too short", byte);
            self.state = State::Idle;
        }
        None
    }

    /// Feed a run of bytes, returning every completed frame.
    pub fn feed_all(&mut self, bytes: &[u8], now_us: u64) -> Vec<HostFrame> {
        bytes
            .iter()
            .filter_map(|&b| self.feed(b, now_us))
            .collect()
    }

    /// Serialize `frame` with sync byte, escaping and checksum trailer.
    pub fn encode(frame: &HostFrame) -> Result<Vec<u8>> {
        let body = frame.to_body()?;
        let mut out = Vec::with_capacity(body.len() * 2 + 2);
        out.push(HOST_SYNC);
        for &b in &body {
            if b == HOST_SYNC || b == HOST_ESCAPE {
                out.push(HOST_ESCAPE);
                out.push(b.wrapping_sub(1));
            } else {
                out.push(b);
            }
        }
        // trailer is never escaped
        out.push(sum(&body));
        Ok(out)
    }
}

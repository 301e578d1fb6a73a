// libaime/src/host/frame.rs

//! Host frame body (everything between the sync byte and the checksum
//! trailer). The first byte is the frame length and counts itself.

use crate::constants::{HOST_REQUEST_HEADER_LEN, HOST_RESPONSE_HEADER_LEN};
use crate::protocol::parser;
use crate::{Error, Result};

/// Which side of the conversation a frame belongs to. Responses carry an
/// extra status byte in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Request,
    Response,
}

impl FrameKind {
    pub fn header_len(&self) -> usize {
        match self {
            Self::Request => HOST_REQUEST_HEADER_LEN,
            Self::Response => HOST_RESPONSE_HEADER_LEN,
        }
    }

    /// Largest payload whose length byte still fits in one byte.
    pub fn max_payload_len(&self) -> usize {
        usize::from(u8::MAX) - self.header_len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFrame {
    pub address: u8,
    pub sequence: u8,
    pub command: u8,
    /// Present on responses only
    pub status: Option<u8>,
    pub payload: Vec<u8>,
}

impl HostFrame {
    pub fn request(address: u8, sequence: u8, command: u8, payload: Vec<u8>) -> Self {
        Self {
            address,
            sequence,
            command,
            status: None,
            payload,
        }
    }

    /// Response to `request`, echoing its address, sequence and command.
    pub fn reply_to(request: &HostFrame, status: u8, payload: Vec<u8>) -> Self {
        Self {
            address: request.address,
            sequence: request.sequence,
            command: request.command,
            status: Some(status),
            payload,
        }
    }

    pub fn kind(&self) -> FrameKind {
        match self.status {
            Some(_) => FrameKind::Response,
            None => FrameKind::Request,
        }
    }

    /// Value of the leading length byte.
    pub fn len_byte(&self) -> usize {
        self.kind().header_len() + self.payload.len()
    }

    /// Serialize the unescaped body: length, header, payload.
    pub fn to_body(&self) -> Result<Vec<u8>> {
        let max = self.kind().max_payload_len();
        if self.payload.len() > max {
            return Err(Error::InvalidLength {
                expected: max,
                actual: self.payload.len(),
            });
        }
        let len = self.len_byte();
        let mut buf = Vec::with_capacity(len);
        buf.push(len as u8);
        buf.push(self.address);
        buf.push(self.sequence);
        buf.push(self.command);
        if let Some(status) = self.status {
            buf.push(status);
        }
        buf.push(self.payload.len() as u8);
        buf.extend_from_slice(&self.payload);
        Ok(buf)
    }

    /// Parse an unescaped body whose length byte has already been matched
    /// against the bytes collected.
    ///
    /// The payload is taken from the payload-length byte; a payload-length
    /// that overruns the frame is a format error.
    pub fn parse(kind: FrameKind, body: &[u8]) -> Result<Self> {
        let header = kind.header_len();
        parser::ensure_len(body, header)?;
        let declared = body[0] as usize;
        if declared != body.len() {
            return Err(Error::InvalidLength {
                expected: declared,
                actual: body.len(),
            });
        }

        let payload_len = body[header - 1] as usize;
        let payload = parser::slice_at(body, header, payload_len).map_err(|_| {
            Error::FrameFormat(format!(
                "payload length {} exceeds frame length {}",
                payload_len, declared
            ))
        })?;

        Ok(Self {
            address: body[1],
            sequence: body[2],
            command: body[3],
            status: match kind {
                FrameKind::Request => None,
                FrameKind::Response => Some(body[4]),
            },
            payload: payload.to_vec(),
        })
    }
}

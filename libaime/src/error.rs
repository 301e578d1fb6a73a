// libaime/src/error.rs

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    ChecksumMismatch { expected: u8, actual: u8 },
    #[error("frame format error: {0}")]
    FrameFormat(String),

    #[error("unexpected response code: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedResponse { expected: u8, actual: u8 },

    /// The chip did not answer a command frame with the ACK pattern.
    #[error("chip did not acknowledge command")]
    NoAck,

    /// The chip never reported ready within the configured retry budget.
    #[error("chip not ready after {attempts} attempts")]
    NotReady { attempts: u32 },

    /// A chip response failed framing or envelope validation.
    #[error("malformed chip response: {0}")]
    Malformed(String),

    /// The chip reported a non-zero status byte for a card operation.
    #[error("chip status error: {status:#04x}")]
    ChipStatus { status: u8 },

    #[error("no card detected")]
    CardAbsent,

    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("bus error: {0}")]
    Bus(String),

    #[error("operation timed out")]
    Timeout,

    /// The builder was not given a bus (or clock) to talk to the chip.
    #[error("device not found")]
    DeviceNotFound,

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    /// True for failures raised by the chip link rather than by request
    /// parsing on the host side.
    pub fn is_chip_error(&self) -> bool {
        matches!(
            self,
            Error::NoAck
                | Error::NotReady { .. }
                | Error::Malformed(_)
                | Error::ChipStatus { .. }
                | Error::Bus(_)
                | Error::Timeout
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

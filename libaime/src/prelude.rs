// libaime/src/prelude.rs

pub use crate::card::{CardSession, CardSummary, FelicaCard, KeySet, MifareCard};
pub use crate::config::{ChipConfig, EngineConfig};
pub use crate::device::{Pn532, Pn532Builder};
pub use crate::host::{
    EngineBuilder, HostCommand, HostFrame, HostFrameCodec, ProtocolEngine, Status, ThroughCode,
};
pub use crate::protocol::ChipCommand;
pub use crate::transport::{Clock, HostPort, SystemClock, Transport};
pub use crate::{
    BaudMode, BlockData, CardFamily, Error, Idm, KeySlot, MifareKey, Pmm, Result, ServiceCode,
    SystemCode, Uid,
};

// Re-export small utilities for convenience
pub use crate::utils::{RetryPolicy, bytes_to_hex, bytes_to_hex_spaced, ms, us};

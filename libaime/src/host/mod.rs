// libaime/src/host/mod.rs

pub mod codec;
pub mod command;
pub mod dispatch;
pub mod engine;
pub mod frame;
pub mod through;

pub use codec::HostFrameCodec;
pub use command::{HostCommand, Status, ThroughCode};
pub use dispatch::{EngineState, Reply};
pub use engine::{EngineBuilder, ProtocolEngine};
pub use frame::{FrameKind, HostFrame};

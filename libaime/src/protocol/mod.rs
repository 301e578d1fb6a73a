// libaime/src/protocol/mod.rs

pub mod checksum;
pub mod codec;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;

pub use checksum::{dcs, lcs};
pub use commands::ChipCommand;
pub use frame::ChipFrame;
pub use responses::*;

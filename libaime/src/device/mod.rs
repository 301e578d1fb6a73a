// libaime/src/device/mod.rs

pub mod builder;
pub mod handle;
pub mod link;

pub use builder::Pn532Builder;
pub use handle::Pn532;
pub use link::ChipLink;

// libaime/src/lib.rs

//! libaime
//!
//! Card-reader protocol bridge: answers a host game system in the byte-framed
//! reader protocol and serves its card commands from a PN532 NFC chip on an
//! I2C bus.

pub mod card;
pub mod config;
pub mod constants;
pub mod device;
pub mod error;
pub mod host;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;

pub mod read;
pub mod write;

// Re-export the operations at the module root so callers can use
// `crate::card::operations::read_blocks(...)`.
pub use read::read_blocks;
pub use write::{WriteOutcome, write_blocks};

use crate::types::ServiceCode;
use crate::{Error, Result};

/// Block access is only supported against exactly one service.
pub(crate) fn single_service(services: &[ServiceCode]) -> Result<ServiceCode> {
    match services {
        [service] => Ok(*service),
        _ => Err(Error::ProtocolViolation(format!(
            "expected one service code, got {}",
            services.len()
        ))),
    }
}

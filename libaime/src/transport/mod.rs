// libaime/src/transport/mod.rs

pub mod clock;
pub mod mock;
pub mod traits;

pub use clock::SystemClock;
pub use mock::{MockClock, MockHostPort, MockTransport};
pub use traits::{Clock, HostPort, Transport};

// Shared helpers for integration tests. Each aggregator pulls this in with
// `mod common;`, so not every helper is used by every test crate.
#![allow(dead_code)]

pub mod fixtures;

use libaime::host::{HostFrame, HostFrameCodec};
use libaime::test_support::EngineFixture;

/// Install env_logger once; RUST_LOG controls the output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wire bytes for a host request.
pub fn request(command: u8, payload: &[u8]) -> Vec<u8> {
    HostFrameCodec::encode(&HostFrame::request(0x00, 0x01, command, payload.to_vec()))
        .expect("request fits a frame")
}

/// Send one request through the engine and return the single response.
pub fn roundtrip(fx: &mut EngineFixture, command: u8, payload: &[u8]) -> HostFrame {
    fx.feed(&request(command, payload));
    let mut frames = HostFrameCodec::for_responses().feed_all(&fx.port.take_output(), 0);
    assert_eq!(frames.len(), 1, "expected exactly one response");
    frames.remove(0)
}

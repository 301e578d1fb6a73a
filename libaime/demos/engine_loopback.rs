// Drive the protocol engine against mock buses.
//
// A FeliCa card is queued on the chip side, then the host asks for the
// firmware string and runs a card detect. Run with RUST_LOG=debug to see
// the engine's log output.

use libaime::prelude::*;
use libaime::test_support::{felica_target, seed_exchange};
use libaime::transport::{MockClock, MockHostPort, MockTransport};

fn main() -> Result<()> {
    env_logger::init();

    let bus = MockTransport::new();
    let clock = MockClock::new();
    let port = MockHostPort::new();

    // SAM configuration, empty contact poll, then a contactless card
    seed_exchange(&bus, 0x14, &[]);
    seed_exchange(&bus, 0x4a, &[0x00]);
    seed_exchange(
        &bus,
        0x4a,
        &felica_target(&[0x01, 0x2e, 0x4c, 0x01, 0x23, 0x45, 0x67, 0x89], &[0; 8], [0x88, 0xb4]),
    );

    let chip = Pn532Builder::new()
        .with_transport(Box::new(bus.clone()))
        .with_clock(Box::new(clock.clone()))
        .build()?;
    let mut engine = ProtocolEngine::builder()
        .chip(chip)
        .port(Box::new(port.clone()))
        .build()?;

    for (seq, command) in [(1u8, 0x30u8), (2, 0x42)] {
        let wire = HostFrameCodec::encode(&HostFrame::request(0x00, seq, command, vec![]))?;
        println!("host -> {}", bytes_to_hex_spaced(&wire));
        port.push_input(&wire);
        engine.tick(clock.now());

        let out = port.take_output();
        println!("host <- {}", bytes_to_hex_spaced(&out));
        for frame in HostFrameCodec::for_responses().feed_all(&out, clock.now()) {
            println!(
                "  command {:#04x} status {:?} payload {}",
                frame.command,
                frame.status,
                bytes_to_hex(&frame.payload)
            );
        }
    }

    if let Some(card) = engine.current_card() {
        println!("current card: {}", card);
    }
    Ok(())
}

use libaime::protocol::codec::{decode_response_frame, encode_command_frame};
use libaime::protocol::{ChipCommand, ChipFrame, dcs, lcs};
use libaime::types::{Idm, SystemCode};
use libaime::Error;

#[test]
fn lcs_and_dcs_examples() {
    assert_eq!(lcs(3), 0xfd);
    assert_eq!(lcs(0), 0x00);
    assert_eq!(dcs(&[0xd4, 0x02]), 0x2a);
}

#[test]
fn list_felica_frame_matches_capture() -> anyhow::Result<()> {
    let cmd = ChipCommand::ListFelica {
        system_code: SystemCode::ANY,
        request_code: 1,
        time_slot: 0,
    };
    let frame = encode_command_frame(&cmd)?;
    assert_eq!(hex::encode(&frame), "0000ff09f7d44a010100ffff0100e100");
    Ok(())
}

#[test]
fn felica_courier_length_counts_itself() -> anyhow::Result<()> {
    let cmd = ChipCommand::FelicaExchange {
        tag: 1,
        idm: Idm::from_bytes([0x11; 8]),
        code: 0x06,
        params: vec![0x01, 0x0b, 0x00, 0x01, 0x80, 0x00],
    };
    let payload = ChipFrame::decode(&encode_command_frame(&cmd)?)?;
    // D4 40 tg len ...
    assert_eq!(payload[3] as usize, payload.len() - 3);
    Ok(())
}

#[test]
fn response_with_trailing_garbage_decodes() -> anyhow::Result<()> {
    let mut frame = ChipFrame::encode(&[0xd5, 0x33])?;
    frame.extend_from_slice(&[0x00, 0x00]);
    assert!(decode_response_frame(0x32, &frame)?.is_empty());
    Ok(())
}

#[test]
fn corrupted_length_checksum_rejected() -> anyhow::Result<()> {
    let mut frame = ChipFrame::encode(&[0xd5, 0x03, 0x32, 0x01, 0x06, 0x07])?;
    frame[4] ^= 0x01;
    assert!(matches!(
        decode_response_frame(0x02, &frame),
        Err(Error::ChecksumMismatch { .. })
    ));
    Ok(())
}

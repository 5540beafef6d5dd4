//! Tests for the DNP3 frame generator.
use super::*;
use crate::core::{ControlCode, DataControl, InternalIndicators, MESSAGE_SIZE_MAX};

fn request(payload: &[u8]) -> MessageBuffer {
    let mut msg = MessageBuffer::new();
    msg.set_addresses(10, 1)
        .set_data_control(
            DataControl::DIRECTION | DataControl::PRIMARY | DataControl::UNCONFIRMED_USER_DATA,
        )
        .set_control_code(ControlCode::READ)
        .set_application_sequence(3);
    msg.add_data(payload).unwrap();
    msg
}

#[test]
/// Ten payload bytes: one fragment, one trailing CRC, length field 18.
fn test_single_fragment_layout() {
    let payload = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
    let mut msg = request(&payload);
    msg.generate().unwrap();

    let out = msg.output();
    assert_eq!(out.len(), 25);
    assert_eq!(&out[..8], &[0x05, 0x64, 18, 0xC4, 0x0A, 0x00, 0x01, 0x00]);
    assert_eq!(&out[8..10], &crc_to_wire(crc16(&out[..8])));

    assert_eq!(out[10], 0xC0); // FIN | FIR | seq 0
    assert_eq!(out[11], 0xE3); // FIR | FIN | CON | seq 3
    assert_eq!(out[12], 0x01); // READ
    assert_eq!(&out[13..23], &payload);
    assert_eq!(&out[23..25], &crc_to_wire(crc16(&out[10..23])));
}

#[test]
/// Responses carry IIN after the function code and never request a confirm.
fn test_response_includes_iin() {
    let mut msg = MessageBuffer::new();
    msg.set_addresses(1, 10)
        .set_control_code(ControlCode::RESPONSE)
        .set_internal_indicators(InternalIndicators::DEVICE_RESTART | InternalIndicators::NEED_TIME)
        .set_application_sequence(7);
    msg.add_data(&[0x3C, 0x01, 0x06]).unwrap();
    msg.generate().unwrap();

    let out = msg.output();
    assert_eq!(out[2], 5 + 5 + 3);
    assert_eq!(&out[10..15], &[0xC0, 0xC7, 0x81, 0x90, 0x00]);
    assert_eq!(&out[15..18], &[0x3C, 0x01, 0x06]);
}

#[test]
/// CRCs are inserted after each 16-byte block and after a trailing partial block.
fn test_block_crc_boundaries() {
    // 3 header bytes + 13 = exactly one block
    let mut msg = request(&[0xAA; 13]);
    msg.generate().unwrap();
    assert_eq!(msg.output_len(), LINK_HEADER_LEN + 16 + CRC_LEN);

    // One more byte spills into a second block
    let mut msg = request(&[0xAA; 14]);
    msg.generate().unwrap();
    let out = msg.output();
    assert_eq!(out.len(), LINK_HEADER_LEN + 17 + 2 * CRC_LEN);
    assert_eq!(&out[26..28], &crc_to_wire(crc16(&out[10..26])));
    assert_eq!(&out[29..31], &crc_to_wire(crc16(&out[28..29])));
}

#[test]
/// A message with no objects still yields the application header and function code.
fn test_empty_message() {
    let mut msg = MessageBuffer::new();
    msg.set_control_code(ControlCode::COLD_RESTART);
    msg.generate().unwrap();

    let out = msg.output();
    assert_eq!(out.len(), LINK_HEADER_LEN + 3 + CRC_LEN);
    assert_eq!(out[2], 8);
    assert_eq!(out[12], 13);
}

#[test]
/// 247 bytes of user data fill the first fragment to the 255-byte cap.
fn test_full_single_fragment() {
    let mut msg = request(&[0x11; 247]);
    msg.generate().unwrap();

    let out = msg.output();
    assert_eq!(out[2], 255);
    assert_eq!(out[10] & transport_header::FIN, transport_header::FIN);
    // 250 data bytes: 15 full blocks and a 10-byte tail
    assert_eq!(out.len(), LINK_HEADER_LEN + 250 + 16 * CRC_LEN);
}

#[test]
/// One byte over the cap opens a continuation fragment.
fn test_two_fragments() {
    let mut msg = request(&[0x22; 248]);
    msg.generate().unwrap();

    let out = msg.output();
    let first_len = LINK_HEADER_LEN + 250 + 16 * CRC_LEN;
    assert_eq!(out[10], transport_header::FIR);

    let second = &out[first_len..];
    assert_eq!(&second[..2], &[0x05, 0x64]);
    assert_eq!(second[2], 7);
    assert_eq!(second[10], transport_header::FIN | 1);
    assert_eq!(second[11], 0x22);
    assert_eq!(second.len(), LINK_HEADER_LEN + 2 + CRC_LEN);

    assert_eq!(msg.transport_sequence(), 2);
}

#[test]
/// Transport sequence wraps from 63 to 0 between fragments.
fn test_transport_sequence_wraps() {
    let mut msg = request(&[0x33; 300]);
    msg.set_transport_sequence(63);
    msg.generate().unwrap();

    let out = msg.output();
    assert_eq!(out[10], transport_header::FIR | 63);
    let second = LINK_HEADER_LEN + 250 + 16 * CRC_LEN;
    assert_eq!(out[second + 10], transport_header::FIN);
    assert_eq!(msg.transport_sequence(), 1);
}

#[test]
/// Four full fragments leave room for a short fifth one; the output capacity is the only bound.
fn test_output_capacity_limit() {
    let mut msg = request(&[0x44; 994]);
    msg.generate().unwrap();
    assert_eq!(msg.output_len(), 4 * (LINK_HEADER_LEN + 250 + 16 * CRC_LEN));
    assert_eq!(msg.transport_sequence(), 4);

    // 1 transport byte + 7 user bytes + CRC closes the buffer exactly.
    let mut msg = request(&[0x44; 1001]);
    msg.generate().unwrap();
    assert_eq!(msg.output_len(), MESSAGE_SIZE_MAX);
    assert_eq!(msg.transport_sequence(), 5);
    assert_eq!(msg.fragments().count(), 5);
    let last = msg.fragments().last().unwrap().unwrap();
    assert!(last.is_final());
    assert_eq!(last.payload(), &[0x44; 7]);

    let mut msg = request(&[0x44; 1002]);
    msg.set_transport_sequence(9);
    assert!(matches!(msg.generate(), Err(BuildError::BufferSizeExceeded { .. })));
    assert_eq!(msg.output_len(), 0);
    assert_eq!(msg.transport_sequence(), 9);
}

#[test]
/// Generating twice rebuilds the output from scratch.
fn test_regenerate_overwrites_output() {
    let mut msg = request(&[0x55; 40]);
    msg.generate().unwrap();
    let first_len = msg.output_len();
    msg.generate().unwrap();
    assert_eq!(msg.output_len(), first_len);
    assert_eq!(msg.output()[10] & transport_header::SEQUENCE_MASK, 1);
}

#[test]
/// The writer refuses headers that do not fit.
fn test_writer_bounds() {
    let mut buffer = [0u8; 9];
    let mut writer = FrameWriter::new(&mut buffer);
    assert!(writer.is_empty());
    assert_eq!(
        writer.begin_fragment(0, 1, 2).unwrap_err(),
        BuildError::BufferSizeExceeded {
            asked: LINK_HEADER_LEN,
            available: 9
        }
    );
}

#[test]
/// Closing a fragment backpatches length and header CRC.
fn test_writer_backpatch() {
    let mut buffer = [0u8; 16];
    let mut writer = FrameWriter::new(&mut buffer);
    let mark = writer.begin_fragment(0xC0, 1, 1024).unwrap();
    assert_eq!(writer.len(), LINK_HEADER_LEN);
    writer.close_fragment(mark, 5).unwrap();

    // Reset Link States: 05 64 05 C0 01 00 00 04 E9 21
    assert_eq!(
        &buffer[..10],
        &[0x05, 0x64, 0x05, 0xC0, 0x01, 0x00, 0x00, 0x04, 0xE9, 0x21]
    );
}

//! Tests for the endian-aware integer helpers.
use super::*;

#[test]
/// Both byte orders for 16-bit values.
fn test_write_u16_orders() {
    let mut buffer = [0u8; 4];
    write_u16(0x0564, ByteOrder::MsbFirst, &mut buffer, 0).unwrap();
    write_u16(0x0400, ByteOrder::LsbFirst, &mut buffer, 2).unwrap();
    assert_eq!(buffer, [0x05, 0x64, 0x00, 0x04]);
}

#[test]
/// 32-bit values land at the requested offset.
fn test_write_u32_orders() {
    let mut buffer = [0u8; 9];
    write_u32(0x1234_5678, ByteOrder::LsbFirst, &mut buffer, 1).unwrap();
    write_u32(0x1234_5678, ByteOrder::MsbFirst, &mut buffer, 5).unwrap();
    assert_eq!(
        buffer,
        [0x00, 0x78, 0x56, 0x34, 0x12, 0x12, 0x34, 0x56, 0x78]
    );
}

#[test]
/// Writes past the end are rejected and leave the buffer untouched.
fn test_write_out_of_bounds() {
    let mut buffer = [0xAAu8; 3];
    assert_eq!(
        write_u16(0xFFFF, ByteOrder::LsbFirst, &mut buffer, 2),
        Err(ByteCodecError::OutOfBounds {
            asked: 2,
            available: 1
        })
    );
    assert_eq!(
        write_u32(0, ByteOrder::MsbFirst, &mut buffer, 10),
        Err(ByteCodecError::OutOfBounds {
            asked: 4,
            available: 0
        })
    );
    assert_eq!(buffer, [0xAA; 3]);
}

#[test]
/// Reads mirror the writes.
fn test_read_u16() {
    let buffer = [0x34, 0x12];
    assert_eq!(read_u16(&buffer, ByteOrder::LsbFirst, 0).unwrap(), 0x1234);
    assert_eq!(read_u16(&buffer, ByteOrder::MsbFirst, 0).unwrap(), 0x3412);
    assert!(read_u16(&buffer, ByteOrder::LsbFirst, 1).is_err());
}

#[test]
/// Narrow reads rebuild 1 to 3 byte values.
fn test_read_u32_variable_length() {
    let buffer = [0x01, 0x02, 0x03, 0x04];
    assert_eq!(read_u32(&buffer, ByteOrder::LsbFirst, 0, 4).unwrap(), 0x0403_0201);
    assert_eq!(read_u32(&buffer, ByteOrder::MsbFirst, 0, 4).unwrap(), 0x0102_0304);
    assert_eq!(read_u32(&buffer, ByteOrder::LsbFirst, 1, 3).unwrap(), 0x0004_0302);
    assert_eq!(read_u32(&buffer, ByteOrder::MsbFirst, 1, 2).unwrap(), 0x0203);
    assert_eq!(read_u32(&buffer, ByteOrder::MsbFirst, 3, 1).unwrap(), 0x04);
    assert_eq!(read_u32(&buffer, ByteOrder::LsbFirst, 0, 0).unwrap(), 0);
}

#[test]
/// Guard rails on width and bounds.
fn test_read_u32_errors() {
    let buffer = [0u8; 8];
    assert_eq!(
        read_u32(&buffer, ByteOrder::LsbFirst, 0, 5),
        Err(ByteCodecError::TooLongForType { max: 4, asked: 5 })
    );
    assert_eq!(
        read_u32(&buffer, ByteOrder::LsbFirst, 6, 4),
        Err(ByteCodecError::OutOfBounds {
            asked: 4,
            available: 2
        })
    );
}

//! Known-answer tests for the DNP3 checksum.
use super::*;

#[test]
/// Catalogue check value for CRC-16/DNP.
fn test_check_value() {
    assert_eq!(crc16(b"123456789"), 0xEA82);
}

#[test]
/// Reset Link States header from a master at 1024 to outstation 1.
fn test_link_header_checksum() {
    let header = [0x05, 0x64, 0x05, 0xC0, 0x01, 0x00, 0x00, 0x04];
    assert_eq!(crc_to_wire(crc16(&header)), [0xE9, 0x21]);
    assert!(crc_matches(&header, &[0xE9, 0x21]));
    assert!(!crc_matches(&header, &[0x21, 0xE9]));
}

#[test]
/// A single flipped bit changes the checksum.
fn test_bit_flip_detected() {
    let block = [0x11u8; 16];
    let mut corrupted = block;
    corrupted[7] ^= 0x04;
    assert_ne!(crc16(&block), crc16(&corrupted));
}

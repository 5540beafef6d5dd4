//! CRC-16/DNP checksum used by the data-link layer.
//!
//! Parameters: polynomial 0x3D65 (reflected), initial value 0, reflected
//! input/output, final XOR 0xFFFF. The checksum travels low byte first.
use crate::core::CRC_LEN;
use ::crc::{Crc, CRC_16_DNP};

const DNP_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_DNP);

/// Compute the DNP3 CRC over `bytes`.
#[inline]
pub fn crc16(bytes: &[u8]) -> u16 {
    DNP_CRC.checksum(bytes)
}

/// Wire representation of a checksum (low byte first).
#[inline]
pub fn crc_to_wire(crc: u16) -> [u8; CRC_LEN] {
    crc.to_le_bytes()
}

/// Check that `expected` holds the wire checksum of `bytes`.
#[inline]
pub fn crc_matches(bytes: &[u8], expected: &[u8]) -> bool {
    expected == crc_to_wire(crc16(bytes))
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

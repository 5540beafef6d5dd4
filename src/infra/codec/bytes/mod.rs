//! Endian-aware conversions between integers and byte slices.
//!
//! DNP3 mixes byte orders inside a single frame: object fields and data-link
//! addresses travel LSB first while the start bytes are MSB first. Each helper
//! takes the order explicitly and checks the slice bounds before touching it.
use crate::error::ByteCodecError;

/// Byte order used when laying an integer into a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteOrder {
    /// Low byte first (DNP3 object fields, addresses).
    LsbFirst,
    /// High byte first.
    MsbFirst,
}

/// Ensure `size` bytes are available at `offset`.
fn check_bounds(buffer_len: usize, offset: usize, size: usize) -> Result<(), ByteCodecError> {
    match offset.checked_add(size) {
        Some(end) if end <= buffer_len => Ok(()),
        _ => Err(ByteCodecError::OutOfBounds {
            asked: size,
            available: buffer_len.saturating_sub(offset),
        }),
    }
}

/// Write a `u16` at `offset`.
pub fn write_u16(
    value: u16,
    order: ByteOrder,
    buffer: &mut [u8],
    offset: usize,
) -> Result<(), ByteCodecError> {
    check_bounds(buffer.len(), offset, 2)?;
    let bytes = match order {
        ByteOrder::LsbFirst => value.to_le_bytes(),
        ByteOrder::MsbFirst => value.to_be_bytes(),
    };
    buffer[offset..offset + 2].copy_from_slice(&bytes);
    Ok(())
}

/// Write a `u32` at `offset`.
pub fn write_u32(
    value: u32,
    order: ByteOrder,
    buffer: &mut [u8],
    offset: usize,
) -> Result<(), ByteCodecError> {
    check_bounds(buffer.len(), offset, 4)?;
    let bytes = match order {
        ByteOrder::LsbFirst => value.to_le_bytes(),
        ByteOrder::MsbFirst => value.to_be_bytes(),
    };
    buffer[offset..offset + 4].copy_from_slice(&bytes);
    Ok(())
}

/// Read a `u16` stored at `offset`.
pub fn read_u16(buffer: &[u8], order: ByteOrder, offset: usize) -> Result<u16, ByteCodecError> {
    check_bounds(buffer.len(), offset, 2)?;
    let bytes = [buffer[offset], buffer[offset + 1]];
    Ok(match order {
        ByteOrder::LsbFirst => u16::from_le_bytes(bytes),
        ByteOrder::MsbFirst => u16::from_be_bytes(bytes),
    })
}

/// Read an unsigned value spread over `length` bytes (1 to 4) at `offset`.
/// Narrow widths show up in variable-size fields such as serial numbers.
pub fn read_u32(
    buffer: &[u8],
    order: ByteOrder,
    offset: usize,
    length: usize,
) -> Result<u32, ByteCodecError> {
    if length > 4 {
        return Err(ByteCodecError::TooLongForType {
            max: 4,
            asked: length,
        });
    }
    check_bounds(buffer.len(), offset, length)?;

    let bytes = &buffer[offset..offset + length];
    let value = match order {
        ByteOrder::LsbFirst => bytes
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &b)| acc | (b as u32) << (i * 8)),
        ByteOrder::MsbFirst => bytes.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32),
    };
    Ok(value)
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

//! Bit packing for DNP3 "packed format" point arrays (variation 1 objects).
//!
//! Bits are shifted in from the right: each `push_bit` moves the pending byte
//! one position left and ORs the new bit into bit 0, so the first bit pushed
//! ends up in the most significant position of a full byte. A trailing partial
//! byte is flushed as-is, right aligned.
use crate::error::BitWriterError;

/// Writer accumulating single bits into a `&mut [u8]` one byte at a time.
pub struct PackedBitWriter<'a> {
    /// Destination buffer, sized by the caller to `ceil(bits / 8)`.
    buffer: &'a mut [u8],
    /// Index of the next byte to flush.
    byte_cursor: usize,
    /// Byte under construction.
    pending: u8,
    /// Number of bits already shifted into `pending`.
    pending_bits: u8,
}

impl<'a> PackedBitWriter<'a> {
    /// Create a writer positioned at the start of the buffer.
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            byte_cursor: 0,
            pending: 0,
            pending_bits: 0,
        }
    }

    /// Number of bytes that `bits` bits occupy once packed.
    #[inline]
    pub const fn packed_len(bits: usize) -> usize {
        bits.div_ceil(8)
    }

    /// Shift one bit into the pending byte, flushing it when eight bits are collected.
    pub fn push_bit(&mut self, bit: bool) -> Result<(), BitWriterError> {
        self.pending = (self.pending << 1) | bit as u8;
        self.pending_bits += 1;

        if self.pending_bits == 8 {
            self.flush_byte()?;
        }
        Ok(())
    }

    /// Write the pending byte, if any, and return the number of bytes written.
    pub fn finish(mut self) -> Result<usize, BitWriterError> {
        if self.pending_bits > 0 {
            self.flush_byte()?;
        }
        Ok(self.byte_cursor)
    }

    fn flush_byte(&mut self) -> Result<(), BitWriterError> {
        let slot = self
            .buffer
            .get_mut(self.byte_cursor)
            .ok_or(BitWriterError::OutOfBounds {
                asked: 1,
                available: 0,
            })?;
        *slot = self.pending;
        self.byte_cursor += 1;
        self.pending = 0;
        self.pending_bits = 0;
        Ok(())
    }
}

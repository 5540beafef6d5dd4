//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (byte codec bounds, bit packing,
//! message building, fragment verification, transmission).
use thiserror_no_std::Error;

//==================================================================================BUILD_ERROR
#[derive(Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while filling a message buffer or generating its frames.
pub enum BuildError {
    /// The user-data accumulator, the output buffer or the fragment budget
    /// cannot hold the requested bytes.
    #[error("Buffer size exceeded -> asked: {asked}, available: {available}")]
    BufferSizeExceeded { asked: usize, available: usize },
    /// The object encoder does not support this variation.
    #[error("Invalid variation {variation} for group {group}")]
    InvalidVariation { group: u8, variation: u8 },
    /// Point arrays must hold 1 to 255 points and stay within a 16-bit index range.
    #[error("Invalid point count: {count}")]
    InvalidPointCount { count: usize },
    /// Device attribute strings are limited to 255 bytes.
    #[error("Attribute value too long: {len} bytes")]
    TextTooLong { len: usize },
    /// Low-level integer codec failure.
    #[error("Byte codec error: {0}")]
    ByteCodec(#[from] ByteCodecError),
    /// Low-level bit packing failure.
    #[error("BitWrite error: {0}")]
    BitWriter(#[from] BitWriterError),
}

//==================================================================================BYTE_CODEC_ERROR
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised by the endian-aware integer helpers.
pub enum ByteCodecError {
    /// Access would run past the end of the buffer.
    #[error("Attempted to access out of bounds -> asked: {asked}, available: {available}")]
    OutOfBounds { asked: usize, available: usize },
    /// Requested more bytes than the target type can hold.
    #[error("Cannot read more than {max} bytes. Requested: {asked}")]
    TooLongForType { max: usize, asked: usize },
}

//==================================================================================BITWRITER_ERROR
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while packing bits into a buffer.
pub enum BitWriterError {
    /// Attempted to write beyond the provided capacity.
    #[error("Attempted to write out of bounds -> asked: {asked}, available: {available}")]
    OutOfBounds { asked: usize, available: usize },
}

//==================================================================================READ_ERROR
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Failures detected while walking the fragments of a framed buffer.
pub enum ReadError {
    /// The buffer ends in the middle of a fragment.
    #[error("Truncated fragment at offset {offset}")]
    Truncated { offset: usize },
    /// The fragment does not open with `0x05 0x64`.
    #[error("Invalid start bytes at offset {offset}")]
    BadStartBytes { offset: usize },
    /// The length field is below the five header bytes it must count.
    #[error("Invalid length field {length} at offset {offset}")]
    InvalidLength { offset: usize, length: u8 },
    /// Data-link header CRC does not match.
    #[error("Header CRC mismatch at offset {offset}")]
    HeaderCrcMismatch { offset: usize },
    /// A payload block CRC does not match.
    #[error("Block CRC mismatch at offset {offset}")]
    BlockCrcMismatch { offset: usize },
}

//==================================================================================SEND_ERROR
#[derive(Debug, Error)]
/// Errors encountered when sending a message (generate + transmit).
pub enum SendMessageError<E: core::fmt::Debug> {
    /// Frame generation failed.
    #[error("Frame build failed: {0:?}")]
    Build(BuildError),
    /// A generated fragment failed verification.
    #[error("Fragment verification failed: {0:?}")]
    Verify(ReadError),
    /// The link refused or failed to send a fragment.
    #[error("Link send error: {0:?}")]
    Send(E),
}

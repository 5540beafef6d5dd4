//! DNP3 message buffer: owns the user-data accumulator, the framed output and
//! the per-message header fields (addresses, sequences, function code, IIN,
//! data-link control).
//!
//! A buffer is reset with [`MessageBuffer::new_message`], filled through the
//! object encoders (or raw [`MessageBuffer::add_byte`] / [`MessageBuffer::add_data`])
//! and turned into wire bytes by [`MessageBuffer::generate`]. Both internal
//! arrays have a fixed capacity; appends past it fail without touching state.
use crate::core::{
    application_header, transport_header, ControlCode, DataControl, InternalIndicators,
    MESSAGE_SIZE_MAX, USER_DATA_MAX,
};
use crate::error::BuildError;
use crate::protocol::link::reader::FragmentReader;

/// Message under construction. Exclusively owned by the session building it.
#[derive(Clone)]
pub struct MessageBuffer {
    pub(crate) user_data: [u8; USER_DATA_MAX],
    pub(crate) user_data_len: usize,
    pub(crate) output: [u8; MESSAGE_SIZE_MAX],
    pub(crate) output_len: usize,
    pub(crate) destination: u16,
    pub(crate) source: u16,
    pub(crate) transport_sequence: u8,
    pub(crate) application_sequence: u8,
    pub(crate) control_code: ControlCode,
    pub(crate) internal_indicators: InternalIndicators,
    pub(crate) data_control: DataControl,
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for MessageBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MessageBuffer")
            .field("user_data_len", &self.user_data_len)
            .field("output_len", &self.output_len)
            .field("destination", &self.destination)
            .field("source", &self.source)
            .field("transport_sequence", &self.transport_sequence)
            .field("application_sequence", &self.application_sequence)
            .field("control_code", &self.control_code)
            .field("internal_indicators", &self.internal_indicators)
            .field("data_control", &self.data_control)
            .finish()
    }
}

impl MessageBuffer {
    /// Empty buffer: addresses 0, sequences 0, `Read` function code.
    pub const fn new() -> Self {
        Self {
            user_data: [0; USER_DATA_MAX],
            user_data_len: 0,
            output: [0; MESSAGE_SIZE_MAX],
            output_len: 0,
            destination: 0,
            source: 0,
            transport_sequence: 0,
            application_sequence: 0,
            control_code: ControlCode::READ,
            internal_indicators: InternalIndicators::NONE,
            data_control: DataControl(0),
        }
    }

    /// Drop accumulated user data and framed output before building a new message.
    /// Addressing, sequences and control fields are kept.
    pub fn new_message(&mut self) {
        self.user_data_len = 0;
        self.output_len = 0;
    }

    //==================================================================================HEADER_FIELDS
    /// Set destination and source data-link addresses.
    pub fn set_addresses(&mut self, destination: u16, source: u16) -> &mut Self {
        self.destination = destination;
        self.source = source;
        self
    }

    pub fn set_control_code(&mut self, control_code: ControlCode) -> &mut Self {
        self.control_code = control_code;
        self
    }

    /// Internal indications, emitted only when the function code is `Response`.
    pub fn set_internal_indicators(&mut self, indicators: InternalIndicators) -> &mut Self {
        self.internal_indicators = indicators;
        self
    }

    pub fn set_data_control(&mut self, data_control: DataControl) -> &mut Self {
        self.data_control = data_control;
        self
    }

    /// Transport sequence used by the next generated fragment (masked to 6 bits).
    pub fn set_transport_sequence(&mut self, sequence: u8) -> &mut Self {
        self.transport_sequence = sequence & transport_header::SEQUENCE_MASK;
        self
    }

    /// Application sequence (masked to 5 bits).
    pub fn set_application_sequence(&mut self, sequence: u8) -> &mut Self {
        self.application_sequence = sequence & application_header::SEQUENCE_MASK;
        self
    }

    /// Advance the application sequence, wrapping at 32, and return the new value.
    pub fn next_application_sequence(&mut self) -> u8 {
        self.application_sequence =
            self.application_sequence.wrapping_add(1) & application_header::SEQUENCE_MASK;
        self.application_sequence
    }

    pub fn destination(&self) -> u16 {
        self.destination
    }

    pub fn source(&self) -> u16 {
        self.source
    }

    pub fn control_code(&self) -> ControlCode {
        self.control_code
    }

    pub fn internal_indicators(&self) -> InternalIndicators {
        self.internal_indicators
    }

    pub fn data_control(&self) -> DataControl {
        self.data_control
    }

    pub fn transport_sequence(&self) -> u8 {
        self.transport_sequence
    }

    pub fn application_sequence(&self) -> u8 {
        self.application_sequence
    }

    //==================================================================================USER_DATA
    /// Append one byte of user data.
    pub fn add_byte(&mut self, byte: u8) -> Result<(), BuildError> {
        let slot = self.reserve(1)?;
        slot[0] = byte;
        Ok(())
    }

    /// Append a block of user data. Nothing is written unless the whole block fits.
    pub fn add_data(&mut self, bytes: &[u8]) -> Result<(), BuildError> {
        self.reserve(bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    /// Accumulated user data.
    #[inline]
    pub fn user_data(&self) -> &[u8] {
        &self.user_data[..self.user_data_len]
    }

    #[inline]
    pub fn user_data_len(&self) -> usize {
        self.user_data_len
    }

    /// Free space left in the accumulator.
    #[inline]
    pub fn user_data_remaining(&self) -> usize {
        USER_DATA_MAX - self.user_data_len
    }

    /// Grow the accumulator by `len` bytes and hand the new region to the caller.
    pub(crate) fn reserve(&mut self, len: usize) -> Result<&mut [u8], BuildError> {
        let available = self.user_data_remaining();
        if len > available {
            return Err(BuildError::BufferSizeExceeded {
                asked: len,
                available,
            });
        }
        let start = self.user_data_len;
        self.user_data_len += len;
        Ok(&mut self.user_data[start..start + len])
    }

    /// Run `encode` and roll the accumulator back if it fails, so multi-part
    /// objects are either appended whole or not at all.
    pub(crate) fn transaction<F>(&mut self, encode: F) -> Result<(), BuildError>
    where
        F: FnOnce(&mut Self) -> Result<(), BuildError>,
    {
        let checkpoint = self.user_data_len;
        let result = encode(self);
        if result.is_err() {
            self.user_data_len = checkpoint;
        }
        result
    }

    //==================================================================================OUTPUT
    /// Framed bytes produced by the last successful [`MessageBuffer::generate`].
    #[inline]
    pub fn output(&self) -> &[u8] {
        &self.output[..self.output_len]
    }

    #[inline]
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Walk and verify the generated fragments.
    pub fn fragments(&self) -> FragmentReader<'_> {
        FragmentReader::new(self.output())
    }
}

//! DNP3 frame generator: turns the user data accumulated in a
//! [`MessageBuffer`] into data-link fragments.
//!
//! Each fragment is laid out as
//!
//! ```text
//! 05 64 | LEN | CTRL | DEST(le) | SRC(le) | CRC      <- 10-byte header
//! TH [AH FC [IIN]] data...  CRC  data... CRC ...     <- 16-byte blocks + CRC
//! ```
//!
//! `LEN` counts the control byte, both addresses and every non-CRC byte after
//! the header; it never exceeds [`MAX_DATA_BYTES`]. Only the first fragment
//! carries the application header (AH), function code (FC) and, for responses,
//! the internal indications. The header is written with placeholders when the
//! fragment opens and backpatched once its length is known.
use crate::core::{
    application_header, header_index, transport_header, ControlCode, CRC_CHUNK_SIZE, CRC_LEN,
    HEADER_COUNTED_BYTES, LINK_HEADER_LEN, MAX_DATA_BYTES, START_BYTES,
};
use crate::error::BuildError;
use crate::infra::codec::bytes::{write_u16, ByteOrder};
use crate::infra::codec::crc::{crc16, crc_to_wire};
use crate::protocol::message::MessageBuffer;

//==================================================================================MARKS
/// Handle on an open fragment, returned by [`FrameWriter::begin_fragment`] and
/// consumed by [`FrameWriter::close_fragment`] to backpatch the header.
#[derive(Debug)]
#[must_use = "an open fragment must be closed to get a valid header"]
pub struct FragmentMark {
    header_start: usize,
}

/// Start of the bytes covered by the next block CRC.
#[derive(Debug, Clone, Copy)]
struct CrcWindow {
    start: usize,
}

//==================================================================================FRAME_WRITER
/// Bounds-checked cursor over the output buffer.
pub struct FrameWriter<'a> {
    buffer: &'a mut [u8],
    len: usize,
}

impl<'a> FrameWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, len: 0 }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn ensure(&self, asked: usize) -> Result<(), BuildError> {
        let available = self.buffer.len() - self.len;
        if asked > available {
            return Err(BuildError::BufferSizeExceeded { asked, available });
        }
        Ok(())
    }

    fn push(&mut self, byte: u8) -> Result<(), BuildError> {
        self.ensure(1)?;
        self.buffer[self.len] = byte;
        self.len += 1;
        Ok(())
    }

    /// Append the CRC of every byte written since `window`.
    fn push_crc(&mut self, window: CrcWindow) -> Result<CrcWindow, BuildError> {
        self.ensure(CRC_LEN)?;
        let crc = crc_to_wire(crc16(&self.buffer[window.start..self.len]));
        self.buffer[self.len..self.len + CRC_LEN].copy_from_slice(&crc);
        self.len += CRC_LEN;
        Ok(CrcWindow { start: self.len })
    }

    /// Reserve a data-link header: start bytes, length placeholder, control,
    /// addresses and CRC placeholder.
    pub fn begin_fragment(
        &mut self,
        control: u8,
        destination: u16,
        source: u16,
    ) -> Result<FragmentMark, BuildError> {
        self.ensure(LINK_HEADER_LEN)?;
        let header_start = self.len;
        let header = &mut self.buffer[header_start..header_start + LINK_HEADER_LEN];

        write_u16(START_BYTES, ByteOrder::MsbFirst, header, header_index::START_BYTES)?;
        header[header_index::LENGTH] = 0;
        header[header_index::CONTROL] = control;
        write_u16(destination, ByteOrder::LsbFirst, header, header_index::DESTINATION)?;
        write_u16(source, ByteOrder::LsbFirst, header, header_index::SOURCE)?;
        write_u16(0, ByteOrder::LsbFirst, header, header_index::CRC)?;

        self.len += LINK_HEADER_LEN;
        Ok(FragmentMark { header_start })
    }

    /// Patch the length field and header CRC of the fragment opened by `mark`.
    pub fn close_fragment(
        &mut self,
        mark: FragmentMark,
        data_count: usize,
    ) -> Result<(), BuildError> {
        let length = u8::try_from(data_count).map_err(|_| BuildError::BufferSizeExceeded {
            asked: data_count,
            available: MAX_DATA_BYTES,
        })?;

        let header = &mut self.buffer[mark.header_start..mark.header_start + LINK_HEADER_LEN];
        header[header_index::LENGTH] = length;
        let crc = crc16(&header[..header_index::CRC]);
        write_u16(crc, ByteOrder::LsbFirst, header, header_index::CRC)?;
        Ok(())
    }
}

//==================================================================================FRAGMENT_STATE
/// Counters for the fragment being streamed.
struct OpenFragment {
    /// Bytes counted by the length field so far.
    data_count: usize,
    /// Bytes written since the last CRC.
    chunk_count: usize,
    window: CrcWindow,
}

impl OpenFragment {
    fn new(writer: &FrameWriter<'_>) -> Self {
        Self {
            data_count: HEADER_COUNTED_BYTES,
            chunk_count: 0,
            window: CrcWindow { start: writer.len() },
        }
    }

    /// Bytes still accepted by the length field.
    fn room(&self) -> usize {
        MAX_DATA_BYTES - self.data_count
    }

    /// Write one counted byte, inserting a CRC after every full block.
    fn push(&mut self, writer: &mut FrameWriter<'_>, byte: u8) -> Result<(), BuildError> {
        writer.push(byte)?;
        self.data_count += 1;
        self.chunk_count += 1;

        if self.chunk_count == CRC_CHUNK_SIZE {
            self.window = writer.push_crc(self.window)?;
            self.chunk_count = 0;
        }
        Ok(())
    }

    /// Protect a trailing partial block and return the recorded length.
    fn seal(self, writer: &mut FrameWriter<'_>) -> Result<usize, BuildError> {
        if self.chunk_count > 0 {
            writer.push_crc(self.window)?;
        }
        Ok(self.data_count)
    }
}

//==================================================================================GENERATOR
/// Per-message header fields, copied out of the buffer for one generation pass.
#[derive(Debug, Clone, Copy)]
struct MessageHeader {
    data_control: u8,
    destination: u16,
    source: u16,
    control_code: ControlCode,
    internal_indicators: u16,
    transport_sequence: u8,
    application_sequence: u8,
}

impl MessageHeader {
    fn of(msg: &MessageBuffer) -> Self {
        Self {
            data_control: msg.data_control.bits(),
            destination: msg.destination,
            source: msg.source,
            control_code: msg.control_code,
            internal_indicators: msg.internal_indicators.bits(),
            transport_sequence: msg.transport_sequence & transport_header::SEQUENCE_MASK,
            application_sequence: msg.application_sequence & application_header::SEQUENCE_MASK,
        }
    }

    /// Header bytes emitted after the data-link header of the first fragment:
    /// transport, application, function code and, for responses, IIN.
    fn first_fragment_overhead(&self) -> usize {
        if self.control_code.is_response() {
            5
        } else {
            3
        }
    }
}

/// Stream `user_data` into `writer`. Returns the transport sequence that
/// follows the last fragment written.
///
/// The only bound is the writer capacity: fragments keep coming while user
/// data remains and fail as soon as a byte would not fit.
fn write_fragments(
    header: &MessageHeader,
    user_data: &[u8],
    writer: &mut FrameWriter<'_>,
) -> Result<u8, BuildError> {
    let response = header.control_code.is_response();
    let mut sequence = header.transport_sequence;
    let mut consumed = 0usize;
    let mut fragment_index = 0usize;

    loop {
        let mark = writer.begin_fragment(header.data_control, header.destination, header.source)?;
        let mut fragment = OpenFragment::new(writer);
        let first = fragment_index == 0;

        let overhead = if first {
            header.first_fragment_overhead()
        } else {
            1
        };
        let remaining = user_data.len() - consumed;
        let fits = remaining <= fragment.room() - overhead;

        let mut transport = sequence;
        if first {
            transport |= transport_header::FIR;
        }
        if fits {
            transport |= transport_header::FIN;
        }
        fragment.push(writer, transport)?;

        if first {
            let mut application =
                application_header::FIR | application_header::FIN | header.application_sequence;
            if !response {
                application |= application_header::CON;
            }
            fragment.push(writer, application)?;
            fragment.push(writer, header.control_code.code())?;

            if response {
                for byte in header.internal_indicators.to_le_bytes() {
                    fragment.push(writer, byte)?;
                }
            }
        }

        while fragment.room() > 0 && consumed < user_data.len() {
            fragment.push(writer, user_data[consumed])?;
            consumed += 1;
        }

        let data_count = fragment.seal(writer)?;
        writer.close_fragment(mark, data_count)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Fragment {} closed: len={}, seq={}, fin={}",
            fragment_index,
            data_count,
            sequence,
            fits
        );

        sequence = (sequence + 1) & transport_header::SEQUENCE_MASK;
        fragment_index += 1;

        if consumed >= user_data.len() {
            return Ok(sequence);
        }
    }
}

impl MessageBuffer {
    /// Frame the accumulated user data into [`MessageBuffer::output`].
    ///
    /// On success the transport sequence is advanced past the fragments written.
    /// On failure no output is exposed (`output_len() == 0`) and the sequence
    /// is left unchanged.
    pub fn generate(&mut self) -> Result<(), BuildError> {
        let header = MessageHeader::of(self);
        let user_data = &self.user_data[..self.user_data_len];
        let mut writer = FrameWriter::new(&mut self.output);

        match write_fragments(&header, user_data, &mut writer) {
            Ok(next_sequence) => {
                self.output_len = writer.len();
                self.transport_sequence = next_sequence;
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("DNP3 frame generation failed: {}", err);
                self.output_len = 0;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

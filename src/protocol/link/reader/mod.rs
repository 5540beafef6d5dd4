//! Verifying reader over framed DNP3 bytes: walks the data-link fragments of a
//! buffer, checks the start bytes, header CRC and every block CRC, and yields
//! each fragment with its checksums stripped.
//!
//! Only the data-link and transport layers are decoded; the application
//! payload is handed back untouched.
use crate::core::{
    header_index, transport_header, CRC_CHUNK_SIZE, CRC_LEN, HEADER_COUNTED_BYTES,
    LINK_HEADER_LEN, MAX_DATA_BYTES, START_BYTES,
};
use crate::error::ReadError;
use crate::infra::codec::bytes::{read_u16, ByteOrder};
use crate::infra::codec::crc::crc_matches;

/// Largest payload a fragment can carry once the five counted header bytes are removed.
pub const MAX_FRAGMENT_PAYLOAD: usize = MAX_DATA_BYTES - HEADER_COUNTED_BYTES;

/// One verified data-link fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Length field as transmitted.
    pub length: u8,
    /// Data-link control byte.
    pub control: u8,
    pub destination: u16,
    pub source: u16,
    /// Bytes following the header with CRCs removed (transport header first).
    data: [u8; MAX_FRAGMENT_PAYLOAD],
    data_len: usize,
    /// Position of the fragment in the scanned buffer.
    pub offset: usize,
    /// Size of the fragment on the wire, header and CRCs included.
    pub wire_len: usize,
}

impl Fragment {
    /// Fragment body: transport header followed by the segment payload.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data[..self.data_len]
    }

    /// Transport segment header byte.
    #[inline]
    pub fn transport_header(&self) -> u8 {
        self.data().first().copied().unwrap_or(0)
    }

    /// Segment payload, transport header excluded.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        self.data().get(1..).unwrap_or(&[])
    }

    #[inline]
    pub fn is_first(&self) -> bool {
        self.transport_header() & transport_header::FIR != 0
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.transport_header() & transport_header::FIN != 0
    }

    #[inline]
    pub fn sequence(&self) -> u8 {
        self.transport_header() & transport_header::SEQUENCE_MASK
    }
}

/// Iterator over the fragments of a framed buffer. Stops after the first error.
#[derive(Debug, Clone)]
pub struct FragmentReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> FragmentReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn read_fragment(&self, offset: usize) -> Result<Fragment, ReadError> {
        let bytes = self.bytes;
        let header = bytes
            .get(offset..offset + LINK_HEADER_LEN)
            .ok_or(ReadError::Truncated { offset })?;

        let start = read_u16(header, ByteOrder::MsbFirst, header_index::START_BYTES)
            .map_err(|_| ReadError::Truncated { offset })?;
        if start != START_BYTES {
            return Err(ReadError::BadStartBytes { offset });
        }
        if !crc_matches(&header[..header_index::CRC], &header[header_index::CRC..]) {
            return Err(ReadError::HeaderCrcMismatch { offset });
        }

        let length = header[header_index::LENGTH];
        if (length as usize) < HEADER_COUNTED_BYTES {
            return Err(ReadError::InvalidLength { offset, length });
        }
        let destination = read_u16(header, ByteOrder::LsbFirst, header_index::DESTINATION)
            .map_err(|_| ReadError::Truncated { offset })?;
        let source = read_u16(header, ByteOrder::LsbFirst, header_index::SOURCE)
            .map_err(|_| ReadError::Truncated { offset })?;

        let mut data = [0u8; MAX_FRAGMENT_PAYLOAD];
        let data_len = length as usize - HEADER_COUNTED_BYTES;
        let mut copied = 0;
        let mut cursor = offset + LINK_HEADER_LEN;

        while copied < data_len {
            let block_len = (data_len - copied).min(CRC_CHUNK_SIZE);
            let block = bytes
                .get(cursor..cursor + block_len + CRC_LEN)
                .ok_or(ReadError::Truncated { offset: cursor })?;
            let (block_data, block_crc) = block.split_at(block_len);
            if !crc_matches(block_data, block_crc) {
                return Err(ReadError::BlockCrcMismatch { offset: cursor });
            }
            data[copied..copied + block_len].copy_from_slice(block_data);
            copied += block_len;
            cursor += block_len + CRC_LEN;
        }

        Ok(Fragment {
            length,
            control: header[header_index::CONTROL],
            destination,
            source,
            data,
            data_len,
            offset,
            wire_len: cursor - offset,
        })
    }
}

impl<'a> Iterator for FragmentReader<'a> {
    type Item = Result<Fragment, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.bytes.len() {
            return None;
        }

        match self.read_fragment(self.offset) {
            Ok(fragment) => {
                self.offset += fragment.wire_len;
                Some(Ok(fragment))
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Rejected DNP3 fragment: {}", err);
                self.offset = self.bytes.len();
                Some(Err(err))
            }
        }
    }
}

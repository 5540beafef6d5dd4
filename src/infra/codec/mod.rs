//! Leaf codecs: endian-aware integers, packed bits and the DNP3 checksum.
pub mod bits;
pub mod bytes;
pub mod crc;

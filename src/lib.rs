//! `dnp3-builder` library: primitives required to compose DNP3 messages in a
//! `no_std` environment. The crate exposes the infrastructure modules (byte,
//! bit and CRC codecs), the protocol logic (message buffer, object encoders,
//! data-link framing and transport segmentation) and the link traits used to
//! push the generated frames to a device.
#![no_std]
//==================================================================================
/// Protocol constants and strongly typed DNP3 vocabulary (function codes,
/// groups, qualifiers, flags).
pub mod core;
/// Domain and low-level errors (buffer overflow, invalid objects, frame
/// verification, transmission).
pub mod error;
/// Low-level codecs: endian-aware integers, bit packing, DNP3 CRC.
pub mod infra;
/// DNP3 protocol implementation: message accumulator, object encoders,
/// data-link framing and the link abstraction.
pub mod protocol;
//==================================================================================

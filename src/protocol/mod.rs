//! High-level components of the DNP3 stack: the message accumulator, object
//! encoders, data-link framing with transport segmentation, and the link
//! traits used to transmit the result.
pub mod link;
pub mod message;
pub mod objects;
pub mod transport;

//! Minimal abstraction for the byte link carrying DNP3 frames (serial port,
//! TCP socket, radio modem…). The library only produces bytes; delivery is
//! left to the implementation.
use futures_util::Future;

/// Contract to push framed bytes to the remote station asynchronously.
pub trait DnpLink {
    type Error: core::fmt::Debug;
    /// Transmit one data-link fragment exactly as given.
    fn send<'a>(&'a mut self, bytes: &'a [u8])
        -> impl Future<Output = Result<(), Self::Error>> + 'a;
}

//! Asynchronous timer abstraction used to pace consecutive fragments.

/// Delay source used to pace consecutive fragments of one message.
pub trait LinkTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a;
}

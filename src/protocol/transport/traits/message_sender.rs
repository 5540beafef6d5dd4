//! `DnpLink` extension providing a high-level API to send a message: it frames
//! the buffer, verifies every fragment and transmits them in order with an
//! inter-fragment delay.
//!
//! The default delay is defined by [`INTER_FRAGMENT_DELAY_MS`].
use crate::{
    error::SendMessageError,
    protocol::message::MessageBuffer,
    protocol::transport::traits::{dnp_link::DnpLink, link_timer::LinkTimer},
    protocol::transport::INTER_FRAGMENT_DELAY_MS,
};

/// Trait extending `DnpLink` with a message-sending helper.
pub trait MessageSender: DnpLink
where
    <Self as DnpLink>::Error: core::fmt::Debug,
{
    /// Generate the frames of `message` and send them over the link.
    ///
    /// Single-fragment messages go out immediately. Multi-fragment messages
    /// wait [`INTER_FRAGMENT_DELAY_MS`] on `timer` between fragments.
    ///
    /// Returns the number of fragments sent.
    ///
    /// # Errors
    ///
    /// - [`SendMessageError::Build`] when framing fails (nothing is sent)
    /// - [`SendMessageError::Verify`] when a generated fragment fails verification
    /// - [`SendMessageError::Send`] when the link rejects a fragment
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use dnp3_builder::core::{ControlCode, Group};
    /// use dnp3_builder::protocol::message::MessageBuffer;
    /// use dnp3_builder::protocol::transport::traits::message_sender::MessageSender;
    ///
    /// let mut msg = MessageBuffer::new();
    /// msg.set_addresses(10, 1).set_control_code(ControlCode::READ);
    /// msg.add_data_object_request(Group::CLASS_OBJECTS, 1, 0, 0)?;
    /// serial.send_message(&mut msg, &mut timer).await?;
    /// ```
    fn send_message<'a, T: LinkTimer>(
        &'a mut self,
        message: &'a mut MessageBuffer,
        timer: &'a mut T,
    ) -> impl core::future::Future<Output = Result<usize, SendMessageError<Self::Error>>> + 'a;
}

impl<L> MessageSender for L
where
    L: DnpLink,
    L::Error: core::fmt::Debug,
{
    fn send_message<'a, T: LinkTimer>(
        &'a mut self,
        message: &'a mut MessageBuffer,
        timer: &'a mut T,
    ) -> impl core::future::Future<Output = Result<usize, SendMessageError<Self::Error>>> + 'a
    {
        async move {
            message.generate().map_err(SendMessageError::Build)?;

            let output = message.output();
            let mut sent = 0;

            for fragment in message.fragments() {
                let fragment = fragment.map_err(SendMessageError::Verify)?;

                if sent > 0 {
                    timer.delay_ms(INTER_FRAGMENT_DELAY_MS).await;
                }

                #[cfg(feature = "defmt")]
                defmt::trace!(
                    "Sending fragment {} ({} bytes, seq {})",
                    sent,
                    fragment.wire_len,
                    fragment.sequence()
                );

                let bytes = &output[fragment.offset..fragment.offset + fragment.wire_len];
                self.send(bytes).await.map_err(SendMessageError::Send)?;
                sent += 1;
            }

            #[cfg(feature = "defmt")]
            defmt::debug!("Message sent in {} fragment(s)", sent);

            Ok(sent)
        }
    }
}

//! Abstraction traits used by the transport layer (byte link, timer, and message sender).
pub mod dnp_link;
pub mod link_timer;
pub mod message_sender;

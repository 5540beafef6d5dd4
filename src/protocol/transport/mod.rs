//! Boundary towards the byte transport: link and timer traits plus the
//! message sender built on top of them.
//!
//! ## Timing Constants
//!
//! Pacing values used by [`MessageSender`](traits::message_sender::MessageSender)
//! and suggested to [`DnpLink`](traits::dnp_link::DnpLink) implementations.

pub mod traits;

/// Recommended delay between two fragments of the same message (ms).
///
/// Gives slow serial outstations and radio modems time to drain their receive
/// buffers. DNP3 itself does not mandate any gap.
pub const INTER_FRAGMENT_DELAY_MS: u32 = 5;

/// Recommended timeout for sending a single fragment (ms).
///
/// A full fragment (292 bytes) takes about 300 ms at 9600 baud; the margin
/// covers modem turnaround.
///
/// [`DnpLink`](traits::dnp_link::DnpLink) implementations **SHOULD**
/// enforce a timeout on `send()` to avoid infinite waits.
pub const LINK_SEND_TIMEOUT_MS: u32 = 1_000;

/// Test doubles simulating the byte link and timer during integration tests.
use dnp3_builder::protocol::transport::traits::{dnp_link::DnpLink, link_timer::LinkTimer};
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

#[allow(dead_code)]
/// In-memory link reproducing the `DnpLink` trait behavior. Every fragment
/// sent is forwarded to the receiver returned by [`MockLink::create`].
pub struct MockLink {
    tx: mpsc::UnboundedSender<Vec<u8>>,
    fail_after: Option<usize>,
    sent: usize,
}

#[allow(dead_code)]
impl MockLink {
    /// Construct a link and the host side receiving its fragments.
    pub fn create() -> (Self, mpsc::UnboundedReceiver<Vec<u8>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                fail_after: None,
                sent: 0,
            },
            rx,
        )
    }

    /// Accept `count` fragments, then refuse every following one.
    pub fn failing_after(mut self, count: usize) -> Self {
        self.fail_after = Some(count);
        self
    }
}

impl DnpLink for MockLink {
    type Error = &'static str;

    async fn send<'a>(&'a mut self, bytes: &'a [u8]) -> Result<(), Self::Error> {
        if self.fail_after.is_some_and(|limit| self.sent >= limit) {
            return Err("link down");
        }
        self.tx.send(bytes.to_vec()).map_err(|_| "host closed")?;
        self.sent += 1;
        Ok(())
    }
}

#[allow(dead_code)]
/// Timer based on `tokio::time::sleep`, recording every requested delay.
#[derive(Default)]
pub struct MockTimer {
    pub delays: Vec<u32>,
}

impl LinkTimer for MockTimer {
    async fn delay_ms(&mut self, millis: u32) {
        self.delays.push(millis);
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

#[allow(dead_code)]
/// Drain every fragment already delivered to the host side.
pub fn collect_frames(rx: &mut mpsc::UnboundedReceiver<Vec<u8>>) -> Vec<Vec<u8>> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(frame);
    }
    frames
}

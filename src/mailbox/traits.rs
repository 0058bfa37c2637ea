//! Traits for the mailbox system

use async_trait::async_trait;

/// Delivery channel for drained mailbox text.
///
/// The registry treats delivery as an abstract side effect: every drain
/// hands its text (possibly empty) to a sink exactly once. Implementations
/// perform whatever framing their protocol requires and must flush before
/// returning, including for empty text — a periodic drain with nothing
/// pending doubles as a keep-alive. Failures are returned to the drain
/// caller unchanged; the registry never retries a transmit.
#[async_trait]
pub trait TransportSink: Send {
    /// Frame, deliver, and flush `text` to the client channel.
    async fn transmit(&mut self, text: &str) -> std::io::Result<()>;
}

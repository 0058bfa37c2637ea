//! Event-stream framing over an async writer
//!
//! A ready-made [`TransportSink`] for the common case of pushing drained
//! text down a long-lived HTTP response as server-sent events. The
//! registry itself never depends on this; any sink implementation works.

use crate::mailbox::traits::TransportSink;
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Sink that frames drained text as a server-sent event over any writer.
///
/// Non-empty text is written as `data: <text>\n\n` followed by a flush.
/// Empty text writes no bytes but still flushes, so a drain with nothing
/// pending doubles as a connection keep-alive.
pub struct EventStreamSink<W> {
    writer: W,
}

impl<W> EventStreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and hand back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W> TransportSink for EventStreamSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn transmit(&mut self, text: &str) -> std::io::Result<()> {
        if !text.is_empty() {
            let framed = format!("data: {text}\n\n");
            self.writer.write_all(framed.as_bytes()).await?;
        }
        self.writer.flush().await
    }
}

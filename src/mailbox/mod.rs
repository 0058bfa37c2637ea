//! Server-Push Mailbox Component
//!
//! A multi-tenant mailbox that buffers outbound text per logical client,
//! serializes concurrent writers, and supports graceful termination of a
//! client's stream. It is the delivery core of a long-lived server-to-client
//! push channel: producers append output at any time, each client's
//! delivery loop periodically drains whatever accumulated, and a close
//! request ends the stream with a terminal sentinel once the backlog is
//! empty.
//!
//! # Overview
//!
//! Key properties:
//!
//! - **Multiple Producers**: any number of tasks can append to any mailbox
//!   concurrently; appends for one identity are totally ordered relative to
//!   the drain that reads them
//! - **Coalesced Delivery**: content is a single accumulated string per
//!   mailbox, so sub-messages between two drains become one delivery,
//!   separated by the caller-chosen delimiter
//! - **Lazy Termination**: `close` never truncates pending data; the
//!   sentinel is synthesized only by a drain that finds the buffer empty
//! - **Abstract Delivery**: drains hand text to an injected
//!   [`TransportSink`]; the mailbox owns no socket or HTTP semantics
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │    close()   │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ enqueue            │ enqueue            │
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                    MailboxRegistry                      │
//! │   "client-a" ──► "...pending text..."   [closing?]      │
//! │   "client-b" ──► "...pending text..."   [closing?]      │
//! └────────┬──────────────────────────────────┬─────────────┘
//!          │ dequeue                          │ dequeue
//! ┌────────┴──────────┐              ┌────────┴──────────┐
//! │ TransportSink (a) │              │ TransportSink (b) │
//! └───────────────────┘              └───────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use pushbox::mailbox::{EventStreamSink, MailboxRegistry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = MailboxRegistry::new();
//!
//! // Producers buffer output for a client at any time.
//! registry.enqueue_single("client-1", "build started").await?;
//! registry.enqueue_many("client-1", &["step 1 ok", "step 2 ok"]).await?;
//!
//! // The client's delivery loop drains on its own cadence.
//! let mut sink = EventStreamSink::new(Vec::new());
//! registry.dequeue("client-1", &mut sink).await?;
//!
//! // End the stream; the next empty drain delivers the sentinel.
//! registry.close("client-1").await?;
//! registry.dequeue("client-1", &mut sink).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;

mod error;
mod identity;
mod registry;
mod sink;
mod traits;

pub use error::{MailboxError, MailboxResult};
pub use identity::QueueIdentity;
pub use registry::{MailboxRegistry, LINE_DELIMITER, TERMINATE_MESSAGE};
pub use sink::EventStreamSink;
pub use traits::TransportSink;

#[cfg(test)]
mod tests;

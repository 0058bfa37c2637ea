//! MailboxRegistry - central coordination for per-client push delivery
//!
//! The registry owns all mailbox state: one pending-text buffer per queue
//! identity plus the close bookkeeping that drives the termination
//! protocol. Producers append through `enqueue_*`, a delivery loop drains
//! through `dequeue`, and `close` schedules a queue's terminal sentinel.
//!
//! Locking is per identity: a short-lived map lock resolves the identity's
//! slot, and the slot's own async gate serializes enqueue/close/dequeue for
//! that identity — including the sink call at the end of a drain — while
//! operations on different identities proceed in parallel. Slots are
//! created with the mailbox lifecycle and retired with it; a slot retired
//! underneath a waiting operation is tombstoned so the waiter re-resolves
//! a fresh one.

use crate::mailbox::error::MailboxResult;
use crate::mailbox::identity::QueueIdentity;
use crate::mailbox::traits::TransportSink;
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Reserved payload that tells a client its stream is finished.
pub const TERMINATE_MESSAGE: &str = "---terminate---";

/// Default delimiter inserted between buffered lines.
pub const LINE_DELIMITER: &str = "\n";

/// Per-identity mailbox state, guarded by its own async gate.
#[derive(Debug, Default)]
struct MailboxSlot {
    /// Pending text. `None` means no buffer has been created yet, which is
    /// observationally identical to an empty, non-terminating buffer.
    buffer: Option<String>,
    /// Close requested but terminal sentinel not yet delivered.
    closing: bool,
    /// Set by the drain that retires this identity. Holders that acquire a
    /// tombstoned slot must re-resolve from the map.
    retired: bool,
}

/// Multi-tenant mailbox registry for a server-push channel
///
/// One registry serves the whole process: any number of producers append
/// text for a logical client, and that client's delivery loop periodically
/// drains the accumulated buffer into a [`TransportSink`]. Closing a queue
/// is lazy — the terminal sentinel is only synthesized by a drain that
/// finds the buffer already empty, so pending data is never truncated.
///
/// # Thread Safety
///
/// All operations take `&self`; share the registry across tasks with
/// `Arc<MailboxRegistry>`. Operations on the same identity are serialized,
/// operations on different identities are not.
///
/// # Example
///
/// ```rust,no_run
/// use pushbox::mailbox::{MailboxRegistry, TransportSink};
///
/// # async fn example(sink: &mut dyn TransportSink) -> Result<(), Box<dyn std::error::Error>> {
/// let registry = MailboxRegistry::new();
///
/// registry.enqueue_single("client-1", "hello").await?;
/// registry.enqueue_single("client-1", "world").await?;
///
/// // Drains "\nhello\nworld" into the sink, then resets the buffer.
/// registry.dequeue("client-1", sink).await?;
///
/// // Schedule termination; the next empty drain delivers the sentinel.
/// registry.close("client-1").await?;
/// registry.dequeue("client-1", sink).await?;
/// # Ok(())
/// # }
/// ```
pub struct MailboxRegistry {
    /// Slot map. The lock is held only for lookup/insert/remove, never
    /// across an await point.
    slots: Mutex<HashMap<QueueIdentity, Arc<AsyncMutex<MailboxSlot>>>>,
}

impl MailboxRegistry {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve the slot for an identity, creating it if absent.
    fn slot(&self, identity: &QueueIdentity) -> Arc<AsyncMutex<MailboxSlot>> {
        let mut slots = self.slots.lock().unwrap();
        Arc::clone(slots.entry(identity.clone()).or_default())
    }

    /// Look up an identity's slot without creating one.
    fn existing_slot(&self, identity: &QueueIdentity) -> Option<Arc<AsyncMutex<MailboxSlot>>> {
        self.slots.lock().unwrap().get(identity).map(Arc::clone)
    }

    /// Acquire the identity's gate, creating the slot if needed and
    /// retrying when a concurrent drain retired the slot underneath us.
    async fn lock_slot(&self, identity: &QueueIdentity) -> OwnedMutexGuard<MailboxSlot> {
        loop {
            let slot = self.slot(identity);
            let guard = slot.lock_owned().await;
            if !guard.retired {
                return guard;
            }
            // Lost the race with a retiring drain; the map serves a fresh
            // slot on the next resolution.
        }
    }

    /// Append a batch of lines to an identity's mailbox.
    ///
    /// The lines are joined with [`LINE_DELIMITER`] and appended behind a
    /// single leading delimiter, so repeated batches between two drains
    /// coalesce into one delivery. An empty batch is not an error; it
    /// appends a bare delimiter.
    pub async fn enqueue_many<S: AsRef<str>>(
        &self,
        token: impl fmt::Display,
        lines: &[S],
    ) -> MailboxResult<()> {
        self.enqueue_many_with(token, lines, LINE_DELIMITER).await
    }

    /// Append a batch of lines joined with a caller-chosen delimiter.
    pub async fn enqueue_many_with<S: AsRef<str>>(
        &self,
        token: impl fmt::Display,
        lines: &[S],
        delimiter: &str,
    ) -> MailboxResult<()> {
        let identity = QueueIdentity::new(token)?;
        let joined = lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<&str>>()
            .join(delimiter);

        let mut guard = self.lock_slot(&identity).await;
        let buffer = guard.buffer.get_or_insert_with(String::new);
        buffer.push_str(delimiter);
        buffer.push_str(&joined);
        Ok(())
    }

    /// Append a single line to an identity's mailbox.
    pub async fn enqueue_single(
        &self,
        token: impl fmt::Display,
        line: &str,
    ) -> MailboxResult<()> {
        self.enqueue_many_with(token, &[line], LINE_DELIMITER).await
    }

    /// Append a single line using a caller-chosen delimiter.
    pub async fn enqueue_single_with(
        &self,
        token: impl fmt::Display,
        line: &str,
        delimiter: &str,
    ) -> MailboxResult<()> {
        self.enqueue_many_with(token, &[line], delimiter).await
    }

    /// Schedule an identity's stream for termination.
    ///
    /// Idempotent, and causes no transmission by itself: the terminal
    /// sentinel is delivered by the first drain that finds the buffer
    /// empty, so anything already enqueued drains first.
    pub async fn close(&self, token: impl fmt::Display) -> MailboxResult<()> {
        let identity = QueueIdentity::new(token)?;
        let mut guard = self.lock_slot(&identity).await;
        if !guard.closing {
            guard.closing = true;
        }
        Ok(())
    }

    /// Drain an identity's mailbox into the given sink.
    ///
    /// Invokes `sink.transmit` exactly once per call, with the identity's
    /// gate held throughout so no writer interleaves with an in-flight
    /// drain. With nothing buffered the transmission is empty, which lets
    /// the sink run its mandatory framing/flush (keep-alive). A drain that
    /// observes the sentinel retires the identity entirely; a later
    /// operation on the same token starts a fresh lifecycle.
    ///
    /// Sink failures surface as [`MailboxError::Sink`] after the buffer has
    /// already been cleared — delivery from the mailbox's perspective is at
    /// most once.
    ///
    /// [`MailboxError::Sink`]: crate::mailbox::MailboxError::Sink
    pub async fn dequeue<S>(
        &self,
        token: impl fmt::Display,
        sink: &mut S,
    ) -> MailboxResult<()>
    where
        S: TransportSink + ?Sized,
    {
        let identity = QueueIdentity::new(token)?;
        loop {
            let Some(slot) = self.existing_slot(&identity) else {
                // Never written to (or already retired): nothing to
                // transmit, but the sink still gets its keep-alive call.
                log::trace!("dequeue {identity}: no mailbox, keep-alive drain");
                sink.transmit("").await?;
                return Ok(());
            };

            let mut guard = slot.lock().await;
            if guard.retired {
                continue;
            }
            let state = &mut *guard;

            let outgoing = match state.buffer.as_mut() {
                None => String::new(),
                Some(buffer) => {
                    if buffer.is_empty() && state.closing {
                        buffer.push_str(TERMINATE_MESSAGE);
                    }
                    mem::take(buffer)
                }
            };

            if outgoing == TERMINATE_MESSAGE {
                log::debug!("mailbox {identity} retired");
                state.buffer = None;
                state.closing = false;
                state.retired = true;
                self.slots.lock().unwrap().remove(&identity);
            }

            sink.transmit(&outgoing).await?;
            return Ok(());
        }
    }

    /// Whether an identity currently has live mailbox state (a buffer or a
    /// pending close).
    pub fn has_mailbox(&self, token: impl fmt::Display) -> MailboxResult<bool> {
        let identity = QueueIdentity::new(token)?;
        Ok(self.slots.lock().unwrap().contains_key(&identity))
    }

    /// Number of identities with live mailbox state.
    pub fn mailbox_count(&self) -> usize {
        self.slots.lock().unwrap().len()
    }
}

impl Default for MailboxRegistry {
    fn default() -> Self {
        Self::new()
    }
}

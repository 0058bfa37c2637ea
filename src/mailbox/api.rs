//! Public API for the mailbox system
//!
//! This module provides the complete public API for the server-push
//! mailbox. External modules should import from here rather than directly
//! from internal modules. See module documentation for complete usage
//! examples and architecture details.

use std::sync::{Arc, LazyLock};

// Core registry and protocol constants
pub use crate::mailbox::registry::{MailboxRegistry, LINE_DELIMITER, TERMINATE_MESSAGE};

// Identity normalization
pub use crate::mailbox::identity::QueueIdentity;

// Transport contract and the bundled event-stream adapter
pub use crate::mailbox::sink::EventStreamSink;
pub use crate::mailbox::traits::TransportSink;

// Error handling
pub use crate::mailbox::error::{MailboxError, MailboxResult};

/// Global mailbox service instance
static MAILBOX_SERVICE: LazyLock<Arc<MailboxRegistry>> = LazyLock::new(|| {
    log::trace!("Initializing mailbox service");
    Arc::new(MailboxRegistry::new())
});

/// Access the process-wide mailbox service.
///
/// Returns the shared registry that producers and delivery loops use to
/// reach each other. Each call returns the same instance; clone the `Arc`
/// freely into whatever tasks need it.
///
/// # Examples
/// ```no_run
/// # use pushbox::mailbox::api::get_mailbox_service;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mailbox = get_mailbox_service();
/// mailbox.enqueue_single("client-1", "progress: 42%").await?;
/// # Ok(())
/// # }
/// ```
pub fn get_mailbox_service() -> Arc<MailboxRegistry> {
    log::trace!("Acquiring mailbox service reference");
    Arc::clone(&MAILBOX_SERVICE)
}

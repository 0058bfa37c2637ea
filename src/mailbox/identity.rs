//! Queue identity normalization
//!
//! Callers address mailboxes with arbitrary tokens (strings, numbers,
//! anything with a textual representation). Before touching shared state,
//! every operation folds its token into a [`QueueIdentity`] so that two
//! spellings of the same client name resolve to the same mailbox.

use crate::mailbox::error::{MailboxError, MailboxResult};
use std::fmt;

/// Normalized key identifying one client's mailbox.
///
/// Normalization is deterministic and case-insensitive: the token is
/// rendered to a string and lower-cased, so `"Room1"` and `"room1"` refer
/// to the same mailbox. A token that renders to the empty string is
/// rejected with [`MailboxError::InvalidIdentity`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueueIdentity(String);

impl QueueIdentity {
    /// Normalize a caller-supplied token into a mailbox key.
    pub fn new(token: impl fmt::Display) -> MailboxResult<Self> {
        let raw = token.to_string();
        if raw.is_empty() {
            return Err(MailboxError::InvalidIdentity {
                reason: "queue identity must not be empty".to_string(),
            });
        }
        Ok(Self(raw.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueueIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Mailbox Error Types

#[derive(Debug, thiserror::Error)]
pub enum MailboxError {
    #[error("Invalid queue identity: {reason}")]
    InvalidIdentity { reason: String },

    #[error("Transport sink failure: {0}")]
    Sink(#[from] std::io::Error),
}

/// Result type for mailbox operations
pub type MailboxResult<T> = Result<T, MailboxError>;

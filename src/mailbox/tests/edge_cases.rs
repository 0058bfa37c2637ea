//! Edge case and error condition tests for the mailbox system
//!
//! These tests verify error handling, unusual delimiters, and the reserved
//! sentinel's collision behavior.

#[cfg(test)]
mod tests {
    use crate::mailbox::api::{MailboxError, MailboxRegistry, TERMINATE_MESSAGE};
    use crate::mailbox::tests::support::{FailingSink, RecordingSink};

    #[tokio::test]
    async fn test_empty_batch_appends_bare_delimiter() {
        let registry = MailboxRegistry::new();
        let mut sink = RecordingSink::new();

        let no_lines: &[&str] = &[];
        registry.enqueue_many("abc", no_lines).await.unwrap();

        registry.dequeue("abc", &mut sink).await.unwrap();
        assert_eq!(sink.last(), "\n");
    }

    #[tokio::test]
    async fn test_custom_delimiter() {
        let registry = MailboxRegistry::new();
        let mut sink = RecordingSink::new();

        registry
            .enqueue_many_with("abc", &["a", "b"], "|")
            .await
            .unwrap();
        registry
            .enqueue_single_with("abc", "c", "|")
            .await
            .unwrap();

        registry.dequeue("abc", &mut sink).await.unwrap();
        assert_eq!(sink.last(), "|a|b|c");
    }

    #[tokio::test]
    async fn test_blank_identity_fails_every_operation() {
        let registry = MailboxRegistry::new();
        let mut sink = RecordingSink::new();

        assert!(matches!(
            registry.enqueue_many("", &["x"]).await,
            Err(MailboxError::InvalidIdentity { .. })
        ));
        assert!(matches!(
            registry.enqueue_single("", "x").await,
            Err(MailboxError::InvalidIdentity { .. })
        ));
        assert!(matches!(
            registry.close("").await,
            Err(MailboxError::InvalidIdentity { .. })
        ));
        assert!(matches!(
            registry.dequeue("", &mut sink).await,
            Err(MailboxError::InvalidIdentity { .. })
        ));

        // A failed normalization never touches shared state or the sink.
        assert_eq!(registry.mailbox_count(), 0);
        assert!(sink.transmissions.is_empty());
    }

    #[tokio::test]
    async fn test_numeric_identity_tokens() {
        let registry = MailboxRegistry::new();
        let mut sink = RecordingSink::new();

        registry.enqueue_single(42, "hi").await.unwrap();
        registry.dequeue("42", &mut sink).await.unwrap();

        assert_eq!(sink.last(), "\nhi");
    }

    #[tokio::test]
    async fn test_sink_failure_propagates_after_buffer_cleared() {
        let registry = MailboxRegistry::new();

        registry.enqueue_single("abc", "doomed").await.unwrap();

        let mut failing = FailingSink;
        let result = registry.dequeue("abc", &mut failing).await;
        assert!(matches!(result, Err(MailboxError::Sink(_))));

        // The drained data is gone: at-most-once delivery.
        let mut sink = RecordingSink::new();
        registry.dequeue("abc", &mut sink).await.unwrap();
        assert_eq!(sink.last(), "");
    }

    #[tokio::test]
    async fn test_sink_failure_on_sentinel_still_retires() {
        let registry = MailboxRegistry::new();
        let mut sink = RecordingSink::new();

        registry.enqueue_single("abc", "warmup").await.unwrap();
        registry.dequeue("abc", &mut sink).await.unwrap();
        registry.close("abc").await.unwrap();

        let mut failing = FailingSink;
        let result = registry.dequeue("abc", &mut failing).await;
        assert!(matches!(result, Err(MailboxError::Sink(_))));

        // Retirement happened before the transmit attempt.
        assert!(!registry.has_mailbox("abc").unwrap());
    }

    #[tokio::test]
    async fn test_enqueued_sentinel_text_collides_with_termination() {
        // The terminal signal is a reserved string compared against the
        // whole drained buffer. With the default delimiter the leading
        // delimiter keeps producer text distinct, but an empty delimiter
        // reproduces the collision: the drain cannot tell this payload from
        // a synthesized termination and retires the queue.
        let registry = MailboxRegistry::new();
        let mut sink = RecordingSink::new();

        registry
            .enqueue_single_with("abc", TERMINATE_MESSAGE, "")
            .await
            .unwrap();

        registry.dequeue("abc", &mut sink).await.unwrap();
        assert_eq!(sink.last(), TERMINATE_MESSAGE);
        assert!(!registry.has_mailbox("abc").unwrap());
    }

    #[tokio::test]
    async fn test_sentinel_with_default_delimiter_does_not_collide() {
        let registry = MailboxRegistry::new();
        let mut sink = RecordingSink::new();

        registry
            .enqueue_single("abc", TERMINATE_MESSAGE)
            .await
            .unwrap();

        registry.dequeue("abc", &mut sink).await.unwrap();
        assert_eq!(sink.last(), format!("\n{TERMINATE_MESSAGE}"));
        assert!(registry.has_mailbox("abc").unwrap());
    }
}

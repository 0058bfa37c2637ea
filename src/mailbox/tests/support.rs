//! Shared sink doubles for mailbox tests

use crate::mailbox::traits::TransportSink;
use async_trait::async_trait;
use std::io;

/// Sink that records every transmission for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub transmissions: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> &str {
        self.transmissions
            .last()
            .map(String::as_str)
            .expect("sink should have received at least one transmission")
    }
}

#[async_trait]
impl TransportSink for RecordingSink {
    async fn transmit(&mut self, text: &str) -> io::Result<()> {
        self.transmissions.push(text.to_string());
        Ok(())
    }
}

/// Sink that fails every transmission with a broken-pipe error.
pub struct FailingSink;

#[async_trait]
impl TransportSink for FailingSink {
    async fn transmit(&mut self, _text: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away"))
    }
}

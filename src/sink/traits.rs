//! Trait abstraction for submission sinks to enable mocking in tests

use crate::state::ContentRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Receives each successfully validated record
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Short description shown in the status bar
    fn describe(&self) -> String;

    /// Hand over one record
    async fn submit(&mut self, record: &ContentRecord) -> Result<()>;
}

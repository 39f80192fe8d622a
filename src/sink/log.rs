//! Sink that writes submitted records to the log

use super::traits::SubmissionSink;
use crate::state::ContentRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Logs each record as JSON at info level
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl SubmissionSink for LogSink {
    fn describe(&self) -> String {
        "log".to_string()
    }

    async fn submit(&mut self, record: &ContentRecord) -> Result<()> {
        let json = serde_json::to_string(record)?;
        tracing::info!(record = %json, "On submit data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_sink_accepts_record() {
        let mut sink = LogSink;
        let record = ContentRecord {
            content_type: "Podcast".to_string(),
            title: "T".to_string(),
            author: "A".to_string(),
            blog_posts: None,
            product_listings: None,
            events: None,
        };
        assert!(tokio_test::block_on(sink.submit(&record)).is_ok());
        assert_eq!(sink.describe(), "log");
    }
}

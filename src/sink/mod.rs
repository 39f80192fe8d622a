//! Submission sinks: where validated records go

mod file;
mod log;
mod traits;

pub use file::JsonFileSink;
pub use log::LogSink;
pub use traits::SubmissionSink;

#[cfg(test)]
pub use traits::MockSubmissionSink;

use crate::config::FormConfig;

/// Build the sink selected by the configuration
pub fn from_config(config: &FormConfig) -> Box<dyn SubmissionSink> {
    match &config.output_path {
        Some(path) => Box::new(JsonFileSink::new(path)),
        None => Box::new(LogSink),
    }
}

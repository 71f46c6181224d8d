use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::error;

/* 📖 # Why is the report sink a trait?

The contract requires exactly one human-readable diagnostic per failed
fallback call. Where that line goes is the embedder's business: production
code wants the tracing pipeline, tests want to count and inspect emissions.
A trait seam gives both without the fallback knowing the difference.
*/

/// Destination for the diagnostic line emitted on each failed fallback call.
pub trait ReportSink: fmt::Debug + Send + Sync + 'static {
    fn report(&self, message: &str);
}

/// Default sink: emits the diagnostic through `tracing::error!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&self, message: &str) {
        error!("{message}");
    }
}

/// In-memory sink for tests: records every diagnostic in order.
///
/// # Examples
///
/// ```
/// use crossfs::RecordingSink;
///
/// let sink = RecordingSink::new();
/// # use crossfs::ReportSink;
/// sink.report("one");
/// assert_eq!(sink.messages(), vec!["one".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All diagnostics recorded so far, in emission order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    /// Number of diagnostics recorded so far.
    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportSink for RecordingSink {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

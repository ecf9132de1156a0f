//! Analysis Host Trait
//!
//! Defines the contract between an analysis and the environment hosting it.
//! The host receives findings and user-facing messages, and owns the task
//! scheduler on which long-running analysis work is placed. Implementations
//! range from editor-protocol servers to the console harness used for local
//! runs.

use crate::diagnostics::DiagnosticFinding;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Severity of a message forwarded to the host's user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    /// Informational message
    Info,
    /// Warning message
    Warning,
    /// Error message
    Error,
}

impl fmt::Display for MessageSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageSeverity::Info => write!(f, "info"),
            MessageSeverity::Warning => write!(f, "warning"),
            MessageSeverity::Error => write!(f, "error"),
        }
    }
}

/// A unit of background work handed to the host scheduler.
pub type HostTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Environment hosting one or more analyses.
///
/// Hosts are shared across tasks, so implementations must be `Send + Sync`
/// and interior-mutable where they keep state.
#[async_trait]
pub trait AnalysisHost: Send + Sync {
    /// Deliver a batch of findings attributed to `source`.
    ///
    /// An empty batch clears previously delivered findings for that source.
    async fn consume(&self, findings: Vec<DiagnosticFinding>, source: &str);

    /// Forward a user-facing message to the host's interface.
    async fn forward_message(&self, severity: MessageSeverity, text: String);

    /// Place background work on the host scheduler.
    ///
    /// The host decides when and where the task runs. Callers must not
    /// assume the task has started when this returns.
    fn submit_task(&self, task: HostTask);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticFinding, SourcePosition};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHost {
        batches: Mutex<Vec<(usize, String)>>,
        messages: Mutex<Vec<(MessageSeverity, String)>>,
    }

    #[async_trait]
    impl AnalysisHost for RecordingHost {
        async fn consume(&self, findings: Vec<DiagnosticFinding>, source: &str) {
            self.batches
                .lock()
                .unwrap()
                .push((findings.len(), source.to_string()));
        }

        async fn forward_message(&self, severity: MessageSeverity, text: String) {
            self.messages.lock().unwrap().push((severity, text));
        }

        fn submit_task(&self, _task: HostTask) {}
    }

    #[tokio::test]
    async fn test_host_trait_object() {
        let recording = std::sync::Arc::new(RecordingHost::default());
        let host: std::sync::Arc<dyn AnalysisHost> = recording.clone();
        let pos = SourcePosition::new("/tmp/a.java", 1, 1, 2);
        host.consume(
            vec![DiagnosticFinding::error(pos, "NULL_DEREFERENCE: x", "NULL_DEREFERENCE")],
            "infer",
        )
        .await;
        host.forward_message(MessageSeverity::Info, "Found infer: v1.1.0".to_string())
            .await;

        let batches = recording.batches.lock().unwrap();
        assert_eq!(batches.as_slice(), &[(1, "infer".to_string())]);
        let messages = recording.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, MessageSeverity::Info);
    }

    #[test]
    fn test_message_severity_display() {
        assert_eq!(MessageSeverity::Warning.to_string(), "warning");
    }
}

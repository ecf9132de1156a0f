//! Diagnostic Data Model
//!
//! Positioned findings produced by an analysis run, in the form consumed by
//! host integrations. A finding carries a resolved source span, a
//! human-readable message, a severity, and an optional execution trace that
//! walks the steps leading to the defect.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity of a diagnostic finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A defect that should be fixed
    Error,
    /// A suspicious construct that may be a defect
    Warning,
    /// Informational note
    Information,
    /// A hint attached to a position
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Information => write!(f, "information"),
            Severity::Hint => write!(f, "hint"),
        }
    }
}

/// A resolved span in a source file.
///
/// Lines and columns are 1-based. The span covers the code between
/// `column_start` and `column_end` on `line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    /// Absolute path of the source file
    pub path: PathBuf,
    /// 1-based line number
    pub line: u32,
    /// 1-based column of the first character of the span
    pub column_start: u32,
    /// 1-based column one past the last character of the span
    pub column_end: u32,
}

impl SourcePosition {
    /// Create a new source position
    pub fn new(path: impl Into<PathBuf>, line: u32, column_start: u32, column_end: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column_start,
            column_end,
        }
    }
}

/// One step of an execution trace attached to a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Position of this step
    pub position: SourcePosition,
    /// What happens at this step
    pub description: String,
}

impl TraceEntry {
    /// Create a new trace entry
    pub fn new(position: SourcePosition, description: impl Into<String>) -> Self {
        Self {
            position,
            description: description.into(),
        }
    }
}

/// A positioned diagnostic finding ready for host consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticFinding {
    /// Where the finding points
    pub position: SourcePosition,
    /// Human-readable message
    pub message: String,
    /// Severity of the finding
    pub severity: Severity,
    /// Analyzer-specific category, e.g. the kind of defect
    pub category: String,
    /// Execution trace leading to the defect, empty when unavailable
    pub trace: Vec<TraceEntry>,
}

impl DiagnosticFinding {
    /// Create an error-severity finding without a trace
    pub fn error(
        position: SourcePosition,
        message: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            position,
            message: message.into(),
            severity: Severity::Error,
            category: category.into(),
            trace: Vec::new(),
        }
    }

    /// Attach an execution trace
    pub fn with_trace(mut self, trace: Vec<TraceEntry>) -> Self {
        self.trace = trace;
        self
    }
}

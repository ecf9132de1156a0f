//! Infer Report Schema
//!
//! Serde model of Infer's `report.json`: a JSON array of bug entries, each
//! with a defect category, a message, a position, and an execution trace.
//! Fields the bridge does not use are ignored; the listed fields are
//! required and fail the parse when absent.

use std::path::{Path, PathBuf};

use infer_bridge_core::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Directory Infer writes its output into, relative to the project root.
pub const REPORT_DIR: &str = "infer-out";

/// Report file name inside the output directory.
pub const REPORT_FILE: &str = "report.json";

/// Location of the report for a project root.
pub fn report_path(project_root: &Path) -> PathBuf {
    project_root.join(REPORT_DIR).join(REPORT_FILE)
}

/// One entry of the report array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BugRecord {
    /// Defect category, e.g. NULL_DEREFERENCE
    pub bug_type: String,
    /// Human-readable defect description
    pub qualifier: String,
    /// File path relative to the project root
    pub file: String,
    /// 1-based line of the defect
    pub line: u32,
    /// Steps leading to the defect
    pub bug_trace: Vec<TraceStep>,
}

/// One step of a bug trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    /// File path relative to the project root
    pub filename: String,
    /// 1-based line of the step
    pub line_number: u32,
    /// What happens at this step
    pub description: String,
}

/// Parse a report file into bug records.
pub fn parse_report(report_path: &Path) -> CoreResult<Vec<BugRecord>> {
    let content = std::fs::read_to_string(report_path)?;
    serde_json::from_str(&content).map_err(|e| {
        CoreError::parse(format!(
            "Malformed Infer report {}: {}",
            report_path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SINGLE_BUG: &str = r#"[
        {
            "bug_type": "NULL_DEREFERENCE",
            "qualifier": "object `o` could be null",
            "file": "src/Main.java",
            "line": 12,
            "severity": "ERROR",
            "procedure": "Main.run()",
            "bug_trace": [
                {
                    "filename": "src/Main.java",
                    "line_number": 10,
                    "description": "assignment of null",
                    "column_number": -1
                }
            ]
        }
    ]"#;

    #[test]
    fn test_report_path_layout() {
        assert_eq!(
            report_path(Path::new("/work/project")),
            PathBuf::from("/work/project/infer-out/report.json")
        );
    }

    #[test]
    fn test_parse_report_ignores_extra_fields() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("report.json");
        fs::write(&path, SINGLE_BUG).unwrap();

        let records = parse_report(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bug_type, "NULL_DEREFERENCE");
        assert_eq!(records[0].line, 12);
        assert_eq!(records[0].bug_trace.len(), 1);
        assert_eq!(records[0].bug_trace[0].line_number, 10);
    }

    #[test]
    fn test_parse_report_missing_field_fails() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("report.json");
        fs::write(
            &path,
            r#"[{"bug_type": "NULL_DEREFERENCE", "file": "a.java", "line": 1, "bug_trace": []}]"#,
        )
        .unwrap();

        assert!(matches!(parse_report(&path), Err(CoreError::Parse(_))));
    }

    #[test]
    fn test_parse_report_not_an_array_fails() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("report.json");
        fs::write(&path, r#"{"bugs": []}"#).unwrap();

        assert!(matches!(parse_report(&path), Err(CoreError::Parse(_))));
    }

    #[test]
    fn test_parse_report_unreadable_file_fails() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing.json");

        assert!(matches!(parse_report(&path), Err(CoreError::Io(_))));
    }

    #[test]
    fn test_parse_empty_report() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("report.json");
        fs::write(&path, "[]").unwrap();

        assert!(parse_report(&path).unwrap().is_empty());
    }
}

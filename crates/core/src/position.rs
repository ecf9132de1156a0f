//! Source Position Resolution
//!
//! Resolves a (file, line) pair from an analyzer report into a precise
//! source span. The default resolver reads the file and trims the span to
//! the first and last non-whitespace characters of the line, so findings
//! underline the code rather than the indentation.

use crate::diagnostics::SourcePosition;
use crate::error::{CoreError, CoreResult};
use std::path::Path;

/// Resolves report coordinates into source spans.
pub trait PositionResolver: Send + Sync {
    /// Resolve a 1-based line of `file` into a span.
    ///
    /// Fails when the file cannot be read or the line does not exist.
    fn resolve(&self, file: &Path, line: u32) -> CoreResult<SourcePosition>;
}

/// Default resolver that spans the code portion of the requested line.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSpanResolver;

impl PositionResolver for FileSpanResolver {
    fn resolve(&self, file: &Path, line: u32) -> CoreResult<SourcePosition> {
        if line == 0 {
            return Err(CoreError::not_found(format!(
                "line 0 of {} (lines are 1-based)",
                file.display()
            )));
        }

        let content = std::fs::read_to_string(file)?;
        let text = content.lines().nth(line as usize - 1).ok_or_else(|| {
            CoreError::not_found(format!("line {} of {}", line, file.display()))
        })?;

        // Span covers the characters between the first and last non-whitespace
        // columns; a blank line collapses to a zero-width span at column 1.
        let mut column_start = 1u32;
        let mut column_end = 1u32;
        let mut first_seen = false;
        for (idx, ch) in text.chars().enumerate() {
            if !ch.is_whitespace() {
                if !first_seen {
                    column_start = idx as u32 + 1;
                    first_seen = true;
                }
                column_end = idx as u32 + 2;
            }
        }

        Ok(SourcePosition::new(file, line, column_start, column_end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_resolve_trims_indentation() {
        let temp = tempfile::tempdir().unwrap();
        let file = write_fixture(&temp, "Main.java", "class Main {\n    o.run();\n}\n");

        let pos = FileSpanResolver.resolve(&file, 2).unwrap();
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column_start, 5);
        assert_eq!(pos.column_end, 13);
    }

    #[test]
    fn test_resolve_blank_line() {
        let temp = tempfile::tempdir().unwrap();
        let file = write_fixture(&temp, "Main.java", "a\n\nb\n");

        let pos = FileSpanResolver.resolve(&file, 2).unwrap();
        assert_eq!(pos.column_start, 1);
        assert_eq!(pos.column_end, 1);
    }

    #[test]
    fn test_resolve_line_zero_fails() {
        let temp = tempfile::tempdir().unwrap();
        let file = write_fixture(&temp, "Main.java", "a\n");

        assert!(FileSpanResolver.resolve(&file, 0).is_err());
    }

    #[test]
    fn test_resolve_line_past_end_fails() {
        let temp = tempfile::tempdir().unwrap();
        let file = write_fixture(&temp, "Main.java", "a\nb\n");

        assert!(FileSpanResolver.resolve(&file, 10).is_err());
    }

    #[test]
    fn test_resolve_missing_file_fails() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("Gone.java");

        assert!(matches!(
            FileSpanResolver.resolve(&missing, 1),
            Err(CoreError::Io(_))
        ));
    }
}

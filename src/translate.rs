//! Report Translation
//!
//! Converts a persisted Infer report into positioned findings. Records whose
//! primary file cannot be resolved are dropped from the batch; trace steps
//! are included only while their file still exists on disk.

use std::path::Path;

use infer_bridge_core::{CoreResult, DiagnosticFinding, PositionResolver, TraceEntry};

use crate::report::{self, BugRecord};

/// Translate the report at `report_path` into findings.
///
/// Fails when the report cannot be read or parsed. Records that cannot be
/// positioned are dropped individually instead of failing the batch.
pub fn translate_report(
    report_path: &Path,
    project_root: &Path,
    resolver: &dyn PositionResolver,
    include_trace: bool,
) -> CoreResult<Vec<DiagnosticFinding>> {
    let records = report::parse_report(report_path)?;
    let mut findings = Vec::with_capacity(records.len());

    for record in records {
        match translate_record(&record, project_root, resolver, include_trace) {
            Ok(finding) => findings.push(finding),
            Err(e) => {
                tracing::debug!(
                    "Dropping {} entry at {}:{}: {}",
                    record.bug_type,
                    record.file,
                    record.line,
                    e
                );
            }
        }
    }

    Ok(findings)
}

/// Translate one record, failing when its primary position cannot be resolved.
fn translate_record(
    record: &BugRecord,
    project_root: &Path,
    resolver: &dyn PositionResolver,
    include_trace: bool,
) -> CoreResult<DiagnosticFinding> {
    let file = project_root.join(&record.file);
    let position = resolver.resolve(&file, record.line)?;
    let message = format!("{}: {}", record.bug_type, record.qualifier);

    let mut finding = DiagnosticFinding::error(position, message, record.bug_type.clone());
    if include_trace {
        finding = finding.with_trace(translate_trace(record, project_root, resolver));
    }
    Ok(finding)
}

/// Resolve the trace steps whose files still exist, skipping the rest.
fn translate_trace(
    record: &BugRecord,
    project_root: &Path,
    resolver: &dyn PositionResolver,
) -> Vec<TraceEntry> {
    let mut trace = Vec::new();
    for step in &record.bug_trace {
        let step_file = project_root.join(&step.filename);
        if !step_file.exists() {
            continue;
        }
        if let Ok(position) = resolver.resolve(&step_file, step.line_number) {
            trace.push(TraceEntry::new(position, step.description.clone()));
        }
    }
    trace
}

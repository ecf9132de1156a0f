//! Infer Bridge
//!
//! Orchestrates the Infer static analyzer for a development-assistance host.
//! Probes how Infer can run on the machine (natively or through Docker),
//! builds the per-run command for the project's build system, supervises the
//! external process with concurrent output capture, and translates the
//! persisted `report.json` into positioned findings.
//!
//! ## Module Organization
//!
//! - `analysis` - Orchestrator wiring probe, builder, supervisor, translator
//! - `context` - Per-project run state (`RunContext`)
//! - `environment` - Native/containerized/unavailable probing
//! - `command` - Invocation construction and container wrapping
//! - `supervisor` - Process spawning and concurrent output draining
//! - `report` - Serde schema of Infer's report
//! - `translate` - Report entries to positioned findings

pub mod analysis;
pub mod command;
pub mod context;
pub mod environment;
pub mod report;
pub mod supervisor;
pub mod translate;

#[cfg(test)]
mod test_support;

// Re-export the orchestrator and its option names
pub use analysis::{
    InferAnalysis, DOCKER_IMAGE_ENV, RUN_COMMAND_OPTION, SOURCE, USE_DEFAULT_COMMAND_OPTION,
};

// Re-export run state and environment probing
pub use context::{RunContext, DEFAULT_CONTAINER_IMAGE};
pub use environment::{probe_environment, ExecutionEnvironment};

// Re-export command construction
pub use command::{
    build_invocation, Invocation, BARE_RUN_COMMAND, BUILD_STEP_PLACEHOLDER,
    CONTAINER_PROJECT_DIR, DEFAULT_COMMAND_TEMPLATE,
};

// Re-export supervision and report translation
pub use report::{parse_report, report_path, BugRecord, TraceStep};
pub use supervisor::RunOutcome;
pub use translate::translate_report;

// Re-export core types so host integrations depend on one crate
pub use infer_bridge_core::{
    detect_build_system, AnalysisHost, BuildSystem, ConfigurationOption, CoreError, CoreResult,
    DiagnosticFinding, FileSpanResolver, HostTask, MessageSeverity, OptionKind, PositionResolver,
    ProjectService, Severity, SourcePosition, TraceEntry,
};

//! Infer Bridge Core
//!
//! Foundational traits, error types, and the diagnostic data model for the
//! Infer Bridge workspace. This crate has zero dependencies on the
//! orchestration layer (process supervision, report translation, etc.).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `diagnostics` - Positioned findings (`DiagnosticFinding`, `SourcePosition`)
//! - `host` - Host abstraction (`AnalysisHost`, `HostTask`, `MessageSeverity`)
//! - `project` - Build system classification (`BuildSystem`, `ProjectService`)
//! - `position` - Source span resolution (`PositionResolver`, `FileSpanResolver`)
//! - `options` - Host-rendered configuration settings (`ConfigurationOption`)
//!
//! ## Design Principles
//!
//! 1. **Minimal dependencies (serde/async-trait/thiserror only)** - keeps build times small
//! 2. **Trait-based seams** - hosts, resolvers, and project services are mockable
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod error;
pub mod diagnostics;
pub mod host;
pub mod project;
pub mod position;
pub mod options;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Diagnostic Data Model ──────────────────────────────────────────────
pub use diagnostics::{DiagnosticFinding, Severity, SourcePosition, TraceEntry};

// ── Host Abstraction ───────────────────────────────────────────────────
pub use host::{AnalysisHost, HostTask, MessageSeverity};

// ── Project Classification ─────────────────────────────────────────────
pub use project::{detect_build_system, BuildSystem, ProjectService};

// ── Position Resolution ────────────────────────────────────────────────
pub use position::{FileSpanResolver, PositionResolver};

// ── Configuration Surface ──────────────────────────────────────────────
pub use options::{ConfigurationOption, OptionKind};

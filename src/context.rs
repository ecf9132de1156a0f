//! Run Context
//!
//! Per-project state of the Infer integration: where the project lives, which
//! build system it uses, how Infer executes, and the user-configured command
//! override. Created once when the project is resolved and owned by the
//! orchestrator for the project lifetime.

use std::path::{Path, PathBuf};

use infer_bridge_core::BuildSystem;

use crate::environment::ExecutionEnvironment;
use crate::report;

/// Container image used when no override is configured.
pub const DEFAULT_CONTAINER_IMAGE: &str = "facebook/infer";

/// Per-project state driving command construction and report handling.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Root of the analyzed project
    pub project_root: PathBuf,
    /// Location of the Infer report for this project
    pub report_path: PathBuf,
    /// Build system of the project
    pub build_system: BuildSystem,
    /// How Infer executes for this project, probed once at registration
    pub environment: ExecutionEnvironment,
    /// Image used for containerized execution
    pub container_image: String,
    /// User-defined command template, used when `use_default_command` is false
    pub configured_command: Option<String>,
    /// Whether the built-in command template is used
    pub use_default_command: bool,
    /// Pending clean build, consumed by the first command construction
    first_run: bool,
}

impl RunContext {
    /// Create the context for a freshly resolved project
    pub fn new(
        project_root: impl AsRef<Path>,
        build_system: BuildSystem,
        environment: ExecutionEnvironment,
    ) -> Self {
        let project_root = project_root.as_ref().to_path_buf();
        let report_path = report::report_path(&project_root);
        Self {
            project_root,
            report_path,
            build_system,
            environment,
            container_image: DEFAULT_CONTAINER_IMAGE.to_string(),
            configured_command: None,
            use_default_command: true,
            first_run: true,
        }
    }

    /// Set the container image
    pub fn with_container_image(mut self, image: impl Into<String>) -> Self {
        self.container_image = image.into();
        self
    }

    /// Whether the next command construction triggers a clean build
    pub fn first_run_pending(&self) -> bool {
        self.first_run
    }

    /// Consume the pending first-run state.
    ///
    /// Returns true exactly once per context lifetime.
    pub fn take_first_run(&mut self) -> bool {
        std::mem::replace(&mut self.first_run, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native_env() -> ExecutionEnvironment {
        ExecutionEnvironment::Native {
            version: "Infer version v1.1.0".to_string(),
        }
    }

    #[test]
    fn test_context_report_path() {
        let ctx = RunContext::new("/work/project", BuildSystem::Maven, native_env());
        assert_eq!(
            ctx.report_path,
            PathBuf::from("/work/project/infer-out/report.json")
        );
    }

    #[test]
    fn test_context_defaults() {
        let ctx = RunContext::new("/work/project", BuildSystem::Gradle, native_env());
        assert!(ctx.use_default_command);
        assert!(ctx.configured_command.is_none());
        assert_eq!(ctx.container_image, DEFAULT_CONTAINER_IMAGE);
        assert!(ctx.first_run_pending());
    }

    #[test]
    fn test_take_first_run_flips_once() {
        let mut ctx = RunContext::new("/work/project", BuildSystem::Maven, native_env());
        assert!(ctx.take_first_run());
        assert!(!ctx.take_first_run());
        assert!(!ctx.first_run_pending());
    }

    #[test]
    fn test_with_container_image() {
        let ctx = RunContext::new("/work/project", BuildSystem::Maven, native_env())
            .with_container_image("example/infer:latest");
        assert_eq!(ctx.container_image, "example/infer:latest");
    }
}

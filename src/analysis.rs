//! Infer Analysis Orchestration
//!
//! Ties the pieces together: resolves the project on first contact, probes
//! the execution environment, and serves rerun requests by submitting one
//! supervised run per request to the host scheduler. Findings and
//! user-facing messages flow back through the `AnalysisHost` trait.

use std::sync::Arc;

use infer_bridge_core::{
    AnalysisHost, ConfigurationOption, FileSpanResolver, MessageSeverity, OptionKind,
    PositionResolver, ProjectService,
};
use tokio::sync::Mutex;

use crate::command;
use crate::context::RunContext;
use crate::environment::{self, ExecutionEnvironment};
use crate::supervisor;
use crate::translate;

/// Tag attached to findings delivered to the host.
pub const SOURCE: &str = "infer";

/// Environment variable overriding the container image.
pub const DOCKER_IMAGE_ENV: &str = "INFER_BRIDGE_DOCKER_IMAGE";

/// Name of the checkbox toggling the built-in command template.
pub const USE_DEFAULT_COMMAND_OPTION: &str = "use default command";

/// Name of the free-text option holding a user-defined command.
pub const RUN_COMMAND_OPTION: &str = "run command";

/// Command configuration applied through the host options.
#[derive(Debug, Clone)]
struct CommandSettings {
    use_default_command: bool,
    configured_command: Option<String>,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            use_default_command: true,
            configured_command: None,
        }
    }
}

/// Mutable analysis state behind one lock.
///
/// Settings arrive through `configure` at any time; the context exists once
/// the project has been resolved. Keeping both under one mutex gives a run
/// task a consistent snapshot.
#[derive(Debug, Default)]
struct AnalysisState {
    context: Option<RunContext>,
    settings: CommandSettings,
}

/// Orchestrates Infer runs for one project.
pub struct InferAnalysis {
    /// Image used for containerized execution
    container_image: String,
    /// Whether findings carry expanded traces
    show_trace: bool,
    /// Resolver turning report coordinates into source spans
    resolver: Arc<dyn PositionResolver>,
    /// Fixed environment, skips probing when set
    environment_override: Option<ExecutionEnvironment>,
    /// Per-project mutable state
    state: Arc<Mutex<AnalysisState>>,
}

impl InferAnalysis {
    /// Create an analysis using `container_image` for containerized runs.
    ///
    /// The `INFER_BRIDGE_DOCKER_IMAGE` environment variable overrides the
    /// given image.
    pub fn new(container_image: impl Into<String>) -> Self {
        let container_image =
            std::env::var(DOCKER_IMAGE_ENV).unwrap_or_else(|_| container_image.into());
        Self {
            container_image,
            show_trace: false,
            resolver: Arc::new(FileSpanResolver),
            environment_override: None,
            state: Arc::new(Mutex::new(AnalysisState::default())),
        }
    }

    /// Enable or disable trace expansion on findings
    pub fn with_trace(mut self, show_trace: bool) -> Self {
        self.show_trace = show_trace;
        self
    }

    /// Replace the position resolver
    pub fn with_resolver(mut self, resolver: Arc<dyn PositionResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Use a fixed execution environment instead of probing the machine
    pub fn with_environment(mut self, environment: ExecutionEnvironment) -> Self {
        self.environment_override = Some(environment);
        self
    }

    /// Image used for containerized runs
    pub fn container_image(&self) -> &str {
        &self.container_image
    }

    /// Tag attached to findings delivered to the host
    pub fn source(&self) -> &'static str {
        SOURCE
    }

    /// Options the host renders for this analysis
    pub fn configuration_options(&self) -> Vec<ConfigurationOption> {
        vec![
            ConfigurationOption::checkbox(USE_DEFAULT_COMMAND_OPTION, true),
            ConfigurationOption::text(RUN_COMMAND_OPTION),
        ]
    }

    /// Apply host-edited configuration options.
    ///
    /// The checkbox toggles the built-in command template; the text option
    /// stores a user-defined template.
    pub async fn configure(&self, options: Vec<ConfigurationOption>) {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        for option in &options {
            match option.kind {
                OptionKind::Checkbox => {
                    state.settings.use_default_command = option.value_as_bool();
                }
                OptionKind::Text => {
                    if let Some(value) = &option.value {
                        state.settings.configured_command = Some(value.clone());
                    }
                }
            }
        }
        if let Some(ctx) = state.context.as_mut() {
            ctx.use_default_command = state.settings.use_default_command;
            ctx.configured_command = state.settings.configured_command.clone();
        }
    }

    /// Handle one analysis request.
    ///
    /// The first call resolves the project, probes the execution
    /// environment, and replays findings persisted by a previous session.
    /// With `rerun` set, one supervised run is submitted to the host
    /// scheduler. The caller must not overlap runs for the same project.
    pub async fn analyze(
        &self,
        project: &dyn ProjectService,
        host: Arc<dyn AnalysisHost>,
        rerun: bool,
    ) {
        self.ensure_registered(project, &host).await;

        if !rerun {
            return;
        }
        if self.state.lock().await.context.is_none() {
            return;
        }

        let state = Arc::clone(&self.state);
        let resolver = Arc::clone(&self.resolver);
        let show_trace = self.show_trace;
        let task_host = Arc::clone(&host);
        host.submit_task(Box::pin(async move {
            run_analysis(state, resolver, show_trace, task_host).await;
        }));
    }

    /// Resolve the project and probe the environment on first contact.
    async fn ensure_registered(&self, project: &dyn ProjectService, host: &Arc<dyn AnalysisHost>) {
        let mut guard = self.state.lock().await;
        if guard.context.is_some() {
            return;
        }
        let root = match project.root_path() {
            Some(root) => root,
            None => return,
        };

        let environment = match &self.environment_override {
            Some(env) => env.clone(),
            None => environment::probe_environment(host.as_ref()).await,
        };

        let mut ctx = RunContext::new(&root, project.build_system(), environment)
            .with_container_image(self.container_image.clone());
        ctx.use_default_command = guard.settings.use_default_command;
        ctx.configured_command = guard.settings.configured_command.clone();

        // Show results persisted by a previous session; an empty batch is
        // not delivered at this point.
        if ctx.report_path.exists() {
            match translate::translate_report(
                &ctx.report_path,
                &ctx.project_root,
                self.resolver.as_ref(),
                self.show_trace,
            ) {
                Ok(findings) if !findings.is_empty() => host.consume(findings, SOURCE).await,
                Ok(_) => {}
                Err(e) => tracing::warn!("Failed to replay persisted Infer report: {}", e),
            }
        }

        guard.context = Some(ctx);
    }
}

/// Body of one submitted run task.
///
/// Builds the invocation under the state lock, releases it for the duration
/// of the supervised run, and delivers the outcome to the host.
async fn run_analysis(
    state: Arc<Mutex<AnalysisState>>,
    resolver: Arc<dyn PositionResolver>,
    show_trace: bool,
    host: Arc<dyn AnalysisHost>,
) {
    let prepared = {
        let mut guard = state.lock().await;
        match guard.context.as_mut() {
            None => None,
            Some(ctx) => {
                if let ExecutionEnvironment::Unavailable { reason } = &ctx.environment {
                    Some(Err(reason.clone()))
                } else {
                    let invocation = command::build_invocation(ctx);
                    Some(Ok((
                        invocation,
                        ctx.project_root.clone(),
                        ctx.report_path.clone(),
                    )))
                }
            }
        }
    };

    let (invocation, project_root, report_path) = match prepared {
        None => return,
        Some(Err(reason)) => {
            host.forward_message(
                MessageSeverity::Error,
                format!("Could not determine infer installation!\n{}", reason),
            )
            .await;
            return;
        }
        Some(Ok(parts)) => parts,
    };

    host.forward_message(
        MessageSeverity::Info,
        format!("Running command: {}", invocation),
    )
    .await;

    let outcome = supervisor::run(&invocation, &project_root, &report_path).await;
    tracing::info!(
        "Infer run finished in {} ms (success: {})",
        outcome.duration.as_millis(),
        outcome.is_success()
    );

    if outcome.is_success() {
        if report_path.exists() {
            match translate::translate_report(
                &report_path,
                &project_root,
                resolver.as_ref(),
                show_trace,
            ) {
                Ok(findings) => host.consume(findings, SOURCE).await,
                Err(e) => {
                    tracing::warn!("Failed to process Infer report: {}", e);
                    host.forward_message(
                        MessageSeverity::Error,
                        format!("Failed to process Infer report: {}", e),
                    )
                    .await;
                    host.consume(Vec::new(), SOURCE).await;
                }
            }
        }
    } else if let Some(reason) = outcome.failure {
        host.forward_message(MessageSeverity::Error, reason).await;
    }
}

//! Infer Command Construction
//!
//! Builds the exact invocation for one analysis run from the run context:
//! picks the build step for the build system, applies the command template,
//! and wraps the result for containerized execution.

use std::fmt;

use crate::context::RunContext;

/// Placeholder in command templates replaced by the build step.
pub const BUILD_STEP_PLACEHOLDER: &str = "{build-step}";

/// Template used while no user-defined command is active.
pub const DEFAULT_COMMAND_TEMPLATE: &str = "infer run --reactive -- {build-step}";

/// Command used when no build step is available.
pub const BARE_RUN_COMMAND: &str = "infer run";

/// Where the project root is mounted inside the container.
pub const CONTAINER_PROJECT_DIR: &str = "/project";

/// One ready-to-spawn command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    tokens: Vec<String>,
}

impl Invocation {
    /// Tokenize a command line on whitespace.
    ///
    /// Arguments containing spaces cannot be expressed this way. The
    /// container wrapper sidesteps the limitation by assembling its tokens
    /// directly, keeping the shell payload intact.
    pub fn from_command_line(line: &str) -> Self {
        Self {
            tokens: line.split_whitespace().map(String::from).collect(),
        }
    }

    /// Build an invocation from pre-split tokens
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// The token sequence, program first
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The program to spawn, `None` for an empty invocation
    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Whether the invocation carries no tokens at all
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

/// Build the invocation for the next run.
///
/// Consumes the context's pending first-run state: the first construction
/// per context uses the clean build step, every later one the incremental
/// step. Without a build step the command is forced to `infer run`
/// regardless of template or configuration.
pub fn build_invocation(ctx: &mut RunContext) -> Invocation {
    let build_step = if ctx.take_first_run() {
        ctx.build_system.clean_build_step()
    } else {
        ctx.build_system.build_step()
    };

    let template = match (&ctx.configured_command, ctx.use_default_command) {
        (Some(custom), false) => custom.clone(),
        _ => DEFAULT_COMMAND_TEMPLATE.to_string(),
    };

    let command = match build_step {
        Some(step) => template.replacen(BUILD_STEP_PLACEHOLDER, step, 1),
        None => BARE_RUN_COMMAND.to_string(),
    };

    if ctx.environment.is_containerized() {
        containerized_invocation(ctx, &command)
    } else {
        Invocation::from_command_line(&command)
    }
}

/// Wrap a command for execution inside the configured container.
///
/// Mounts the build cache of the detected build system and the project root,
/// then runs the command through `/bin/bash -c` as a single token.
fn containerized_invocation(ctx: &RunContext, command: &str) -> Invocation {
    let mut tokens: Vec<String> = vec!["docker".into(), "run".into(), "--rm".into()];

    if let Some(cache_dir) = ctx.build_system.cache_dir_name() {
        if let Some(home) = dirs::home_dir() {
            tokens.push("-v".into());
            tokens.push(format!(
                "{}/{}:/root/{}",
                home.display(),
                cache_dir,
                cache_dir
            ));
        }
    }

    tokens.push("-v".into());
    tokens.push(format!(
        "{}:{}",
        ctx.project_root.display(),
        CONTAINER_PROJECT_DIR
    ));
    tokens.push(ctx.container_image.clone());
    tokens.push("/bin/bash".into());
    tokens.push("-c".into());
    tokens.push(format!("cd {} && {}", CONTAINER_PROJECT_DIR, command));

    Invocation::from_tokens(tokens)
}

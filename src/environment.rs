//! Execution Environment Probe
//!
//! Determines how Infer runs on this machine: natively, inside a Docker
//! container, or not at all. Probed once per project when it is registered
//! and cached in the run context.

use std::process::Stdio;
use std::time::Duration;

use infer_bridge_core::{AnalysisHost, MessageSeverity};
use tokio::process::Command;
use tokio::time::timeout;

/// How long a version probe may run before it counts as a failure.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// How Infer executes for a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionEnvironment {
    /// `infer` runs directly on the machine
    Native {
        /// First line of `infer --version`
        version: String,
    },
    /// `infer` runs inside a Docker container
    Containerized,
    /// Neither infer nor docker is usable
    Unavailable {
        /// Failure message of the native probe
        reason: String,
    },
}

impl ExecutionEnvironment {
    /// Whether runs must be wrapped in a container
    pub fn is_containerized(&self) -> bool {
        matches!(self, ExecutionEnvironment::Containerized)
    }

    /// Whether Infer can run at all
    pub fn is_available(&self) -> bool {
        !matches!(self, ExecutionEnvironment::Unavailable { .. })
    }
}

/// Probe the machine and report the outcome to the host.
///
/// Tries `infer --version` first; when that fails, times out, or exits
/// non-zero, falls back to `docker -v`. Emits exactly one message to the
/// host regardless of outcome.
pub async fn probe_environment(host: &dyn AnalysisHost) -> ExecutionEnvironment {
    probe_with_commands(host, &["infer", "--version"], &["docker", "-v"]).await
}

/// Probe with explicit commands so tests can substitute fixtures.
async fn probe_with_commands(
    host: &dyn AnalysisHost,
    native: &[&str],
    container: &[&str],
) -> ExecutionEnvironment {
    match run_probe(native).await {
        Ok(version) => {
            host.forward_message(MessageSeverity::Info, format!("Found infer: {}", version))
                .await;
            ExecutionEnvironment::Native { version }
        }
        Err(native_failure) => match run_probe(container).await {
            Ok(_) => {
                host.forward_message(MessageSeverity::Info, "Found docker".to_string())
                    .await;
                ExecutionEnvironment::Containerized
            }
            Err(_) => {
                host.forward_message(
                    MessageSeverity::Error,
                    format!("Could not determine infer installation!\n{}", native_failure),
                )
                .await;
                ExecutionEnvironment::Unavailable {
                    reason: native_failure,
                }
            }
        },
    }
}

/// Run one version probe, returning the first stdout line on success.
async fn run_probe(command: &[&str]) -> Result<String, String> {
    let (program, args) = match command.split_first() {
        Some(split) => split,
        None => return Err("Empty probe command".to_string()),
    };

    let mut cmd = Command::new(program);
    cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());

    match timeout(PROBE_TIMEOUT, cmd.output()).await {
        Ok(Ok(output)) if output.status.success() => {
            let first_line = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("")
                .to_string();
            Ok(first_line)
        }
        Ok(Ok(output)) => Err(format!("'{}' exited with {}", program, output.status)),
        Ok(Err(e)) => Err(format!("Failed to run '{}': {}", program, e)),
        Err(_) => Err(format!(
            "'{}' did not finish within {} seconds",
            program,
            PROBE_TIMEOUT.as_secs()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeHost;
    use infer_bridge_core::MessageSeverity;

    #[tokio::test]
    async fn test_probe_native() {
        let host = FakeHost::new();
        let env = probe_with_commands(
            &host,
            &["echo", "Infer version v1.1.0"],
            &["nonexistent-command-12345"],
        )
        .await;

        assert_eq!(
            env,
            ExecutionEnvironment::Native {
                version: "Infer version v1.1.0".to_string()
            }
        );
        let messages = host.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, MessageSeverity::Info);
        assert_eq!(messages[0].1, "Found infer: Infer version v1.1.0");
    }

    #[tokio::test]
    async fn test_probe_falls_back_to_docker() {
        let host = FakeHost::new();
        let env = probe_with_commands(
            &host,
            &["nonexistent-command-12345"],
            &["echo", "Docker version 24.0.2"],
        )
        .await;

        assert_eq!(env, ExecutionEnvironment::Containerized);
        assert!(env.is_containerized());
        let messages = host.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].1, "Found docker");
    }

    #[tokio::test]
    async fn test_probe_nonzero_exit_falls_back_to_docker() {
        let host = FakeHost::new();
        let env =
            probe_with_commands(&host, &["false"], &["echo", "Docker version 24.0.2"]).await;

        assert_eq!(env, ExecutionEnvironment::Containerized);
    }

    #[tokio::test]
    async fn test_probe_unavailable() {
        let host = FakeHost::new();
        let env = probe_with_commands(
            &host,
            &["nonexistent-command-12345"],
            &["nonexistent-command-54321"],
        )
        .await;

        assert!(matches!(env, ExecutionEnvironment::Unavailable { .. }));
        assert!(!env.is_available());
        let messages = host.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, MessageSeverity::Error);
        assert!(messages[0]
            .1
            .starts_with("Could not determine infer installation!"));
    }
}

//! Process Supervision
//!
//! Spawns one analysis invocation, drains stdout and stderr concurrently,
//! waits for exit, and classifies the outcome. Both pipes are drained on
//! spawned tasks which are joined before the run returns; an unconsumed pipe
//! would otherwise block the child once the kernel buffer fills.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;

use crate::command::Invocation;

/// Outcome of one supervised run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Exit code, `None` when the process never started or died to a signal
    pub exit_code: Option<i32>,
    /// Captured stdout lines
    pub stdout: Vec<String>,
    /// Captured stderr lines
    pub stderr: Vec<String>,
    /// Failure description, `None` on success
    pub failure: Option<String>,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RunOutcome {
    /// Whether the run completed with exit status 0
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Successful completion
    fn success(
        exit_code: Option<i32>,
        stdout: Vec<String>,
        stderr: Vec<String>,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            failure: None,
            duration,
        }
    }

    /// Non-zero exit, with joined stderr as the failure reason
    fn failed(
        exit_code: Option<i32>,
        stdout: Vec<String>,
        stderr: Vec<String>,
        duration: Duration,
    ) -> Self {
        let reason = if stderr.is_empty() {
            match exit_code {
                Some(code) => format!("Command exited with status {}", code),
                None => "Command terminated by signal".to_string(),
            }
        } else {
            stderr.join("\n")
        };
        Self {
            exit_code,
            stdout,
            stderr,
            failure: Some(reason),
            duration,
        }
    }

    /// I/O fault while supervising an already started process
    fn fault(
        reason: impl Into<String>,
        stdout: Vec<String>,
        stderr: Vec<String>,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code: None,
            stdout,
            stderr,
            failure: Some(reason.into()),
            duration,
        }
    }

    /// The process was never spawned
    fn not_started(reason: impl Into<String>) -> Self {
        Self::fault(reason, Vec::new(), Vec::new(), Duration::ZERO)
    }
}

/// Run one invocation in `working_dir`, removing any stale report first.
///
/// Exit status 0 counts as success even when no report was written
/// afterwards; the caller decides what an absent report means. There is no
/// timeout on the supervised process.
pub async fn run(invocation: &Invocation, working_dir: &Path, report_path: &Path) -> RunOutcome {
    if let Err(e) = std::fs::remove_file(report_path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            return RunOutcome::not_started(format!(
                "Failed to remove stale report {}: {}",
                report_path.display(),
                e
            ));
        }
    }

    let (program, args) = match invocation.tokens().split_first() {
        Some(split) => split,
        None => return RunOutcome::not_started("Empty analysis command"),
    };

    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args)
        .current_dir(working_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            let reason = if e.kind() == std::io::ErrorKind::NotFound {
                format!("Command '{}' not found in PATH", program)
            } else {
                format!("Failed to start '{}': {}", program, e)
            };
            return RunOutcome::not_started(reason);
        }
    };

    // Drain both pipes before waiting so the child never blocks on output.
    let stdout_drain = spawn_line_drain(child.stdout.take());
    let stderr_drain = spawn_line_drain(child.stderr.take());

    let status = child.wait().await;
    let (stdout_lines, stderr_lines) = tokio::join!(stdout_drain, stderr_drain);
    let stdout_lines = stdout_lines.unwrap_or_default();
    let stderr_lines = stderr_lines.unwrap_or_default();
    let duration = start.elapsed();

    match status {
        Ok(status) if status.success() => {
            RunOutcome::success(status.code(), stdout_lines, stderr_lines, duration)
        }
        Ok(status) => RunOutcome::failed(status.code(), stdout_lines, stderr_lines, duration),
        Err(e) => RunOutcome::fault(
            format!("Failed to wait for '{}': {}", program, e),
            stdout_lines,
            stderr_lines,
            duration,
        ),
    }
}

/// Collect a pipe into lines on a spawned task.
fn spawn_line_drain<R>(pipe: Option<R>) -> JoinHandle<Vec<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut collected = Vec::new();
        if let Some(pipe) = pipe {
            let reader = BufReader::new(pipe);
            let mut lines = reader.lines();
            while let Ok(Some(line)) = lines.next_line().await {
                collected.push(line);
            }
        }
        collected
    })
}

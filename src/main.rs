//! Infer Bridge Console Host
//!
//! Runs one Infer analysis from the command line: resolves the project,
//! detects its build system by marker files, prints forwarded messages to
//! stderr, and renders findings on stdout.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use tokio::task::JoinHandle;

use infer_bridge::analysis::InferAnalysis;
use infer_bridge::context::DEFAULT_CONTAINER_IMAGE;
use infer_bridge::{
    detect_build_system, AnalysisHost, BuildSystem, DiagnosticFinding, HostTask, MessageSeverity,
    ProjectService,
};

/// Run Infer against a project and print the findings.
#[derive(Parser)]
#[command(name = "infer-bridge", about = "Run Infer against a project and print the findings")]
#[command(version)]
struct Cli {
    /// Project root to analyze
    #[arg(default_value = ".")]
    project: PathBuf,

    /// Docker image for containerized execution
    #[arg(long, default_value = DEFAULT_CONTAINER_IMAGE)]
    docker_image: String,

    /// Include execution traces on findings
    #[arg(long)]
    trace: bool,

    /// Print findings as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Host that prints findings to stdout and schedules tasks on tokio.
struct ConsoleHost {
    handles: Mutex<Vec<JoinHandle<()>>>,
    json: bool,
}

impl ConsoleHost {
    fn new(json: bool) -> Self {
        Self {
            handles: Mutex::new(Vec::new()),
            json,
        }
    }

    /// Wait for every scheduled task to finish.
    async fn wait_idle(&self) {
        loop {
            let handle = self.handles.lock().unwrap().pop();
            match handle {
                Some(handle) => {
                    let _ = handle.await;
                }
                None => break,
            }
        }
    }

    fn print_text(&self, findings: &[DiagnosticFinding]) {
        if findings.is_empty() {
            println!("No findings.");
            return;
        }
        for finding in findings {
            println!(
                "{}:{}:{}: {}: {}",
                finding.position.path.display(),
                finding.position.line,
                finding.position.column_start,
                finding.severity,
                finding.message
            );
            for step in &finding.trace {
                println!(
                    "    {}:{}:{}: {}",
                    step.position.path.display(),
                    step.position.line,
                    step.position.column_start,
                    step.description
                );
            }
        }
    }
}

#[async_trait]
impl AnalysisHost for ConsoleHost {
    async fn consume(&self, findings: Vec<DiagnosticFinding>, source: &str) {
        if self.json {
            match serde_json::to_string_pretty(&findings) {
                Ok(rendered) => println!("{}", rendered),
                Err(e) => eprintln!("[error] Failed to render findings from {}: {}", source, e),
            }
        } else {
            self.print_text(&findings);
        }
    }

    async fn forward_message(&self, severity: MessageSeverity, text: String) {
        eprintln!("[{}] {}", severity, text);
    }

    fn submit_task(&self, task: HostTask) {
        self.handles.lock().unwrap().push(tokio::spawn(task));
    }
}

/// Project service backed by marker-file detection.
struct MarkerProjectService {
    root: PathBuf,
}

impl ProjectService for MarkerProjectService {
    fn root_path(&self) -> Option<PathBuf> {
        Some(self.root.clone())
    }

    fn build_system(&self) -> BuildSystem {
        detect_build_system(&self.root)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let root = cli
        .project
        .canonicalize()
        .with_context(|| format!("Project root {} does not exist", cli.project.display()))?;

    let host = Arc::new(ConsoleHost::new(cli.json));
    let host_dyn: Arc<dyn AnalysisHost> = host.clone();
    let project = MarkerProjectService { root };
    let analysis = InferAnalysis::new(cli.docker_image).with_trace(cli.trace);

    analysis.analyze(&project, host_dyn, true).await;
    host.wait_idle().await;

    Ok(())
}

//! Test doubles shared by the crate's unit tests.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use infer_bridge_core::{
    AnalysisHost, BuildSystem, DiagnosticFinding, HostTask, MessageSeverity, ProjectService,
};

/// Host double recording messages and batches, stashing submitted tasks so
/// tests can drive them to completion.
#[derive(Default)]
pub struct FakeHost {
    pub messages: Mutex<Vec<(MessageSeverity, String)>>,
    pub batches: Mutex<Vec<(Vec<DiagnosticFinding>, String)>>,
    pub tasks: Mutex<Vec<HostTask>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every stashed task to completion, including tasks submitted while
    /// draining.
    pub async fn drain_tasks(&self) {
        loop {
            let task = self.tasks.lock().unwrap().pop();
            match task {
                Some(task) => task.await,
                None => break,
            }
        }
    }

    pub fn message_texts(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl AnalysisHost for FakeHost {
    async fn consume(&self, findings: Vec<DiagnosticFinding>, source: &str) {
        self.batches
            .lock()
            .unwrap()
            .push((findings, source.to_string()));
    }

    async fn forward_message(&self, severity: MessageSeverity, text: String) {
        self.messages.lock().unwrap().push((severity, text));
    }

    fn submit_task(&self, task: HostTask) {
        self.tasks.lock().unwrap().push(task);
    }
}

/// Project service double with a fixed root and build system.
pub struct FakeProjectService {
    pub root: Option<PathBuf>,
    pub build_system: BuildSystem,
}

impl FakeProjectService {
    pub fn new(root: impl Into<PathBuf>, build_system: BuildSystem) -> Self {
        Self {
            root: Some(root.into()),
            build_system,
        }
    }

    pub fn unresolved() -> Self {
        Self {
            root: None,
            build_system: BuildSystem::Unknown,
        }
    }
}

impl ProjectService for FakeProjectService {
    fn root_path(&self) -> Option<PathBuf> {
        self.root.clone()
    }

    fn build_system(&self) -> BuildSystem {
        self.build_system
    }
}

//! Build System Detection
//!
//! Classifies the build system of a project root by looking for marker files
//! (pom.xml, build.gradle, gradlew), and defines the project service trait
//! through which analyses learn about the project they are attached to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Build system of the analyzed project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
    /// Maven project (pom.xml)
    Maven,
    /// Gradle project (build.gradle, build.gradle.kts, gradlew)
    Gradle,
    /// Unrecognized build system
    Unknown,
}

impl BuildSystem {
    /// Build step that compiles from a clean state
    pub fn clean_build_step(&self) -> Option<&'static str> {
        match self {
            BuildSystem::Maven => Some("mvn clean compile"),
            BuildSystem::Gradle => Some("./gradlew clean build"),
            BuildSystem::Unknown => None,
        }
    }

    /// Build step that compiles incrementally
    pub fn build_step(&self) -> Option<&'static str> {
        match self {
            BuildSystem::Maven => Some("mvn compile"),
            BuildSystem::Gradle => Some("./gradlew build"),
            BuildSystem::Unknown => None,
        }
    }

    /// Name of the per-user build cache directory under `$HOME`
    pub fn cache_dir_name(&self) -> Option<&'static str> {
        match self {
            BuildSystem::Maven => Some(".m2"),
            BuildSystem::Gradle => Some(".gradle"),
            BuildSystem::Unknown => None,
        }
    }

    /// Marker files identifying this build system in a project root
    pub fn marker_files(&self) -> &'static [&'static str] {
        match self {
            BuildSystem::Maven => &["pom.xml"],
            BuildSystem::Gradle => &["build.gradle", "build.gradle.kts", "gradlew"],
            BuildSystem::Unknown => &[],
        }
    }
}

impl fmt::Display for BuildSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildSystem::Maven => write!(f, "maven"),
            BuildSystem::Gradle => write!(f, "gradle"),
            BuildSystem::Unknown => write!(f, "unknown"),
        }
    }
}

/// Detect the build system of a project root by marker files.
///
/// Maven markers are checked before Gradle markers; the first match wins.
pub fn detect_build_system(project_root: impl AsRef<Path>) -> BuildSystem {
    let root = project_root.as_ref();
    for system in [BuildSystem::Maven, BuildSystem::Gradle] {
        for marker in system.marker_files() {
            if root.join(marker).exists() {
                return system;
            }
        }
    }
    BuildSystem::Unknown
}

/// Source of project information for an analysis.
pub trait ProjectService: Send + Sync {
    /// Root path of the project, `None` until the project is resolved
    fn root_path(&self) -> Option<PathBuf>;

    /// Build system of the project
    fn build_system(&self) -> BuildSystem;
}

//! Build execution
//!
//! The resolver never runs anything itself; a resolved plan is handed to a
//! [`BuildExecutor`]. The default implementation drives the project's
//! Gradle wrapper.

use crate::plan::{ArtifactKind, ResolvedBuildPlan};
use apkforge_core::error::Result;
use apkforge_core::process::{run_command_in_dir, CommandResult};
use std::path::{Path, PathBuf};

/// Capability interface the resolver's output is handed to
pub trait BuildExecutor {
    /// Build the plan into the requested artifact kind
    fn execute(&self, plan: &ResolvedBuildPlan, kind: ArtifactKind) -> Result<CommandResult>;

    /// Remove previous build artifacts
    fn clean(&self) -> Result<CommandResult>;
}

/// Executes plans through the project's Gradle wrapper
pub struct GradleExecutor {
    project_dir: PathBuf,
}

impl GradleExecutor {
    /// Create an executor rooted at the given project directory
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    /// The wrapper script name for the current platform
    pub fn wrapper() -> &'static str {
        if cfg!(windows) {
            "gradlew.bat"
        } else {
            "./gradlew"
        }
    }

    /// Project directory this executor builds in
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn run_task(&self, task: &str) -> Result<CommandResult> {
        run_command_in_dir(Self::wrapper(), &[task], &self.project_dir)
    }
}

impl BuildExecutor for GradleExecutor {
    fn execute(&self, plan: &ResolvedBuildPlan, kind: ArtifactKind) -> Result<CommandResult> {
        self.run_task(&plan.gradle_task(kind))
    }

    fn clean(&self) -> Result<CommandResult> {
        self.run_task("clean")
    }
}

//! Project skeleton generator
//!
//! Creates the standard directory layout and installs the shared helpers,
//! configuration, base controllers and the entry point.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::{CommandContext, Generated};
use crate::scaffold::generator::{ProjectDescriptor, PROJECT_DIRS};
use crate::scaffold::ActionSink;

/// Creates a new project
pub struct InitCommand {
    path: PathBuf,
}

impl InitCommand {
    /// `path` is relative to the working directory unless absolute
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create the project
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or a template fails.
    pub fn execute(&self, ctx: &CommandContext, sink: &dyn ActionSink) -> Result<Generated> {
        let project_dir = normalize(&ctx.cwd.join(&self.path));
        let descriptor = ProjectDescriptor::new(project_dir.clone(), &ctx.package_root())
            .context("Failed to describe project")?;

        tracing::info!(
            project = %descriptor.project_name,
            package = %descriptor.package_name,
            "initializing project"
        );

        for dir in PROJECT_DIRS {
            let dir = project_dir.join(dir);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        let materializer = ctx.materializer(sink);
        descriptor
            .jobs(ctx.renderer.source())
            .into_iter()
            .map(|job| -> Result<_> {
                let outcome = materializer
                    .run(&job, &descriptor)
                    .with_context(|| format!("Failed to generate {}", job.output.display()))?;
                Ok((job.output, outcome))
            })
            .collect()
    }
}

/// Resolve `.` and `..` lexically
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

//! Model generator

use anyhow::{Context, Result};

use super::{CommandContext, Generated};
use crate::scaffold::{ActionSink, ModelDescriptor, ScaffoldGenerator};

/// Generates one model
pub struct ModelCommand {
    name: String,
    fields: Vec<String>,
}

impl ModelCommand {
    #[must_use]
    pub const fn new(name: String, fields: Vec<String>) -> Self {
        Self { name, fields }
    }

    /// Write the model struct and its database session into `models/`
    ///
    /// # Errors
    ///
    /// Returns an error if `models/` is missing, a field declaration is
    /// malformed, or a template fails.
    pub fn execute(&self, ctx: &CommandContext, sink: &dyn ActionSink) -> Result<Generated> {
        let descriptor = ModelDescriptor::new(&self.name, &self.fields, &ctx.package_name())
            .context("Invalid model definition")?;
        let generator = ScaffoldGenerator::new(descriptor, ctx.cwd.clone());
        generator.require_dir("models")?;

        let materializer = ctx.materializer(sink);
        generator
            .model_jobs()
            .into_iter()
            .map(|job| -> Result<_> {
                let outcome = materializer
                    .run(&job, generator.descriptor())
                    .with_context(|| format!("Failed to generate {}", job.output.display()))?;
                Ok((job.output, outcome))
            })
            .collect()
    }
}

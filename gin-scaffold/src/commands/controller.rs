//! Controller generator
//!
//! Writes `controllers/<plural>.go` and registers its routes in the router
//! file, right after the route marker line.

use anyhow::{Context, Result};

use super::{CommandContext, Generated};
use crate::scaffold::generator::ROUTE_TEMPLATE;
use crate::scaffold::{
    ActionSink, Insertion, ModelDescriptor, Outcome, ScaffoldGenerator, TemplateHelpers,
};

/// Generates one controller
pub struct ControllerCommand {
    name: String,
    fields: Vec<String>,
}

impl ControllerCommand {
    /// `name` may be singular or plural
    #[must_use]
    pub const fn new(name: String, fields: Vec<String>) -> Self {
        Self { name, fields }
    }

    /// Generate the controller and register its routes
    ///
    /// Routes are only registered when the controller file is newly created,
    /// so re-running does not duplicate them.
    ///
    /// # Errors
    ///
    /// Returns an error if `controllers/` or the router file is missing, a
    /// field declaration is malformed, or a template fails.
    pub fn execute(&self, ctx: &CommandContext, sink: &dyn ActionSink) -> Result<Generated> {
        let singular = TemplateHelpers::singularize(&self.name);
        let descriptor = ModelDescriptor::new(&singular, &self.fields, &ctx.package_name())
            .context("Invalid controller definition")?;
        let generator = ScaffoldGenerator::new(descriptor, ctx.cwd.clone());
        generator.require_dir("controllers")?;

        let materializer = ctx.materializer(sink);
        let job = generator.controller_job();
        let outcome = materializer
            .run(&job, generator.descriptor())
            .with_context(|| format!("Failed to generate {}", job.output.display()))?;
        let generated = vec![(job.output, outcome)];

        if outcome == Outcome::Skipped {
            return Ok(generated);
        }

        let router = ctx
            .config
            .router_file
            .as_ref()
            .map_or_else(|| generator.default_router_file(), |file| ctx.cwd.join(file));
        let insertion = materializer
            .insert_after(&router, &ctx.config.route_marker, ROUTE_TEMPLATE, generator.descriptor())
            .with_context(|| format!("Failed to register routes in {}", router.display()))?;

        if insertion == Insertion::MarkerMissing {
            tracing::warn!(
                router = %router.display(),
                marker = %ctx.config.route_marker,
                "route marker not found; routes not registered"
            );
        }
        Ok(generated)
    }
}

//! Model plus controller in one step
//!
//! # Example
//!
//! ```bash
//! gin-scaffold scaffold post title:text views:integer published_at:datetime
//! ```

use anyhow::Result;

use super::{CommandContext, ControllerCommand, Generated, ModelCommand};
use crate::scaffold::{ActionSink, TemplateHelpers};

/// Generates a model and its controller
pub struct ScaffoldCommand {
    name: String,
    fields: Vec<String>,
}

impl ScaffoldCommand {
    #[must_use]
    pub const fn new(name: String, fields: Vec<String>) -> Self {
        Self { name, fields }
    }

    /// Run the model generator, then the controller generator for the plural
    ///
    /// # Errors
    ///
    /// Returns the first error from either generator.
    pub fn execute(&self, ctx: &CommandContext, sink: &dyn ActionSink) -> Result<Generated> {
        let singular = TemplateHelpers::singularize(&self.name);
        let plural = TemplateHelpers::pluralize(&singular);

        let mut generated =
            ModelCommand::new(singular, self.fields.clone()).execute(ctx, sink)?;
        generated.extend(ControllerCommand::new(plural, self.fields.clone()).execute(ctx, sink)?);
        Ok(generated)
    }
}

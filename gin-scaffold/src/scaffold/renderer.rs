//! Template loading and rendering
//!
//! Uses minijinja for rendering. Every compiled template owns its own
//! environment and [`SequenceCounter`], so renders never share counter state.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::functions::{FunctionLibrary, SequenceCounter};
use crate::error::{Result, ScaffoldError};

/// Supplies template text by identifier
pub trait TemplateSource {
    /// Load the source of the template named `identifier`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateRead`] if the template does not exist or
    /// cannot be read.
    fn load(&self, identifier: &str) -> Result<String>;
}

/// Templates stored as files under a root directory
#[derive(Debug, Clone)]
pub struct TemplateDir {
    root: PathBuf,
}

impl TemplateDir {
    /// Create a source rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an identifier to a path; absolute identifiers are kept as-is
    #[must_use]
    pub fn path_of(&self, identifier: &str) -> PathBuf {
        let path = Path::new(identifier);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Identifiers of the `*.tmpl` files directly inside `dir`, sorted
    ///
    /// A missing directory yields an empty list.
    #[must_use]
    pub fn list(&self, dir: &str) -> Vec<String> {
        let mut identifiers: Vec<String> = WalkDir::new(self.root.join(dir))
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| name.ends_with(".tmpl"))
            .map(|name| format!("{dir}/{name}"))
            .collect();
        identifiers.sort();
        identifiers
    }
}

impl TemplateSource for TemplateDir {
    fn load(&self, identifier: &str) -> Result<String> {
        let path = self.path_of(identifier);
        tracing::debug!(template = identifier, path = %path.display(), "loading template");
        fs::read_to_string(&path).map_err(|source| ScaffoldError::TemplateRead {
            identifier: identifier.to_string(),
            source,
        })
    }
}

/// Templates held in memory, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplates {
    templates: HashMap<String, String>,
}

impl InMemoryTemplates {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a template, replacing any previous one with the same identifier
    #[must_use]
    pub fn with(mut self, identifier: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.insert(identifier.into(), source.into());
        self
    }
}

impl TemplateSource for InMemoryTemplates {
    fn load(&self, identifier: &str) -> Result<String> {
        self.templates
            .get(identifier)
            .cloned()
            .ok_or_else(|| ScaffoldError::TemplateRead {
                identifier: identifier.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such template"),
            })
    }
}

/// Loads, compiles and renders templates with the function library bound
#[derive(Debug)]
pub struct Renderer<S> {
    source: S,
    library: FunctionLibrary,
}

impl<S: TemplateSource> Renderer<S> {
    /// Create a renderer over a template source
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            source,
            library: FunctionLibrary,
        }
    }

    /// Template source
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Load and parse a template without executing it
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be loaded or has a syntax error.
    pub fn compile(&self, identifier: &str) -> Result<CompiledTemplate> {
        let text = self.source.load(identifier)?;

        let counter = SequenceCounter::new();
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        self.library.install(&mut env, &counter);

        env.add_template_owned(identifier.to_string(), text)
            .map_err(|err| ScaffoldError::template(identifier, err))?;

        Ok(CompiledTemplate {
            identifier: identifier.to_string(),
            env,
            counter,
        })
    }

    /// Render a template against `data`
    ///
    /// # Errors
    ///
    /// Returns an error on load, syntax or execution failure.
    pub fn render<D: Serialize>(&self, identifier: &str, data: &D) -> Result<String> {
        self.compile(identifier)?.render(data)
    }
}

/// A parsed template ready to execute
#[derive(Debug)]
pub struct CompiledTemplate {
    identifier: String,
    env: Environment<'static>,
    counter: SequenceCounter,
}

impl CompiledTemplate {
    /// Render into a string
    ///
    /// # Errors
    ///
    /// Returns an error if execution fails (unknown function, missing field, ...).
    pub fn render<D: Serialize>(&self, data: &D) -> Result<String> {
        self.counter.set(0);
        self.template()?
            .render(data)
            .map_err(|err| ScaffoldError::template(&self.identifier, err))
    }

    /// Render into a writer
    ///
    /// Output already written before an execution error is left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if execution or writing fails.
    pub fn render_to<D: Serialize, W: Write>(&self, data: &D, writer: W) -> Result<()> {
        self.counter.set(0);
        self.template()?
            .render_to_write(data, writer)
            .map_err(|err| ScaffoldError::template(&self.identifier, err))?;
        Ok(())
    }

    fn template(&self) -> Result<minijinja::Template<'_, '_>> {
        self.env
            .get_template(&self.identifier)
            .map_err(|err| ScaffoldError::template(&self.identifier, err))
    }
}

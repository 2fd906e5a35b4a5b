//! CLI command implementations

pub mod controller;
pub mod init;
pub mod model;
pub mod scaffold;

pub use controller::ControllerCommand;
pub use init::InitCommand;
pub use model::ModelCommand;
pub use scaffold::ScaffoldCommand;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::ScaffoldConfig;
use crate::scaffold::{ActionSink, Materializer, Outcome, Renderer, TemplateDir};

/// Files touched by a command, with what happened to each
pub type Generated = Vec<(PathBuf, Outcome)>;

/// Everything a command needs from its environment
pub struct CommandContext {
    /// Loaded configuration
    pub config: ScaffoldConfig,
    /// Renderer over the templates root
    pub renderer: Renderer<TemplateDir>,
    /// Directory the command runs in
    pub cwd: PathBuf,
}

impl CommandContext {
    /// Build a context from an explicit configuration and working directory
    #[must_use]
    pub fn new(config: ScaffoldConfig, cwd: PathBuf) -> Self {
        let root = config.templates_root();
        tracing::debug!(templates = %root.display(), cwd = %cwd.display(), "command context");
        Self {
            renderer: Renderer::new(TemplateDir::new(root)),
            config,
            cwd,
        }
    }

    /// Load configuration and use the process working directory
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is malformed or the working directory
    /// is unavailable.
    pub fn load() -> Result<Self> {
        let config = ScaffoldConfig::load().context("Failed to load configuration")?;
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::new(config, cwd))
    }

    /// Package root of the working directory
    #[must_use]
    pub fn package_root(&self) -> String {
        self.config.package_root(&self.cwd)
    }

    /// Import path of the project rooted at the working directory
    ///
    /// Outside every workspace this is the directory name, matching what
    /// `init` records for a project created there.
    #[must_use]
    pub fn package_name(&self) -> String {
        let root = self.package_root();
        if !root.is_empty() {
            return root;
        }
        self.cwd
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned())
    }

    /// Materializer reporting to `sink`
    #[must_use]
    pub fn materializer<'a>(&'a self, sink: &'a dyn ActionSink) -> Materializer<'a, TemplateDir> {
        Materializer::new(&self.renderer, sink)
    }
}

//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Scaffolding error type
///
/// Everything except a destination conflict is fatal: the command layer
/// propagates these to `main` and the process exits non-zero.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Template source could not be read
    #[error("failed to read template '{identifier}': {source}")]
    TemplateRead {
        /// Template identifier as requested
        identifier: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Template failed to parse or execute
    #[error("template error in '{identifier}': {source}")]
    Template {
        /// Template identifier as requested
        identifier: String,
        /// Underlying template engine error
        source: minijinja::Error,
    },

    /// File system operation failed
    #[error("{action} {}: {source}", path.display())]
    Io {
        /// What was being attempted ("create", "open", ...)
        action: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Temporary file could not be moved over the original
    #[error("failed to replace {}: {source}", path.display())]
    Replace {
        /// File being replaced
        path: PathBuf,
        /// Underlying persist error
        source: tempfile::PersistError,
    },

    /// Field declaration is not `name:type`
    #[error("invalid field declaration '{0}': expected name:type")]
    InvalidField(String),

    /// Model name cannot produce identifiers
    #[error("invalid model name '{0}'")]
    InvalidModelName(String),

    /// Project directory has no usable name
    #[error("invalid project directory: {}", .0.display())]
    InvalidProjectDir(PathBuf),

    /// Expected project directory is missing
    #[error("directory not found: {} (run this command from a project root)", .0.display())]
    MissingLayout(PathBuf),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl ScaffoldError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn template(identifier: &str, source: minijinja::Error) -> Self {
        Self::Template {
            identifier: identifier.to_string(),
            source,
        }
    }
}

/// Result alias for scaffolding operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;

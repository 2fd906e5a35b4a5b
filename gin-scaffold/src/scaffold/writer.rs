//! Materializing rendered templates on disk
//!
//! New files are never written over existing ones: a destination that already
//! exists is reported as a skip and left alone, so re-running a generator keeps
//! manual edits.

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::actions::{Action, ActionSink};
use super::patch::{self, Insertion};
use super::renderer::{Renderer, TemplateSource};
use crate::error::{Result, ScaffoldError};

/// A template paired with its destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateJob {
    /// Template identifier
    pub template: String,
    /// Output path
    pub output: PathBuf,
}

impl TemplateJob {
    /// Create a job
    #[must_use]
    pub fn new(template: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            output: output.into(),
        }
    }
}

/// Result of writing a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// File was created
    Created,
    /// File already existed and was left untouched
    Skipped,
}

/// Writes and patches files through a renderer, announcing every action
pub struct Materializer<'a, S> {
    renderer: &'a Renderer<S>,
    sink: &'a dyn ActionSink,
}

impl<'a, S: TemplateSource> Materializer<'a, S> {
    /// Create a materializer
    #[must_use]
    pub const fn new(renderer: &'a Renderer<S>, sink: &'a dyn ActionSink) -> Self {
        Self { renderer, sink }
    }

    /// Render `template` into a new file at `output`
    ///
    /// If anything exists at `output`, including a dangling symlink, nothing is
    /// rendered or written.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails or the file cannot be created.
    /// A render failure after creation leaves the partial file in place.
    pub fn write<D: Serialize>(&self, output: &Path, template: &str, data: &D) -> Result<Outcome> {
        if output.symlink_metadata().is_ok() {
            return Ok(self.skip(output));
        }

        let compiled = self.renderer.compile(template)?;

        let file = match OpenOptions::new().write(true).create_new(true).open(output) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(self.skip(output)),
            Err(err) => return Err(ScaffoldError::io("create", output, err)),
        };
        self.sink.record(Action::Create, output);

        let mut writer = BufWriter::new(file);
        compiled.render_to(data, &mut writer)?;
        writer
            .flush()
            .map_err(|err| ScaffoldError::io("write", output, err))?;

        tracing::debug!(path = %output.display(), template, "file created");
        Ok(Outcome::Created)
    }

    fn skip(&self, output: &Path) -> Outcome {
        self.sink.record(Action::Skip, output);
        Outcome::Skipped
    }

    /// Run a [`TemplateJob`] through [`Self::write`]
    ///
    /// # Errors
    ///
    /// See [`Self::write`].
    pub fn run<D: Serialize>(&self, job: &TemplateJob, data: &D) -> Result<Outcome> {
        self.write(&job.output, &job.template, data)
    }

    /// Insert `template` after the first line of `output` starting with `marker`
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails or the file cannot be rewritten.
    pub fn insert_after<D: Serialize>(
        &self,
        output: &Path,
        marker: &str,
        template: &str,
        data: &D,
    ) -> Result<Insertion> {
        self.sink.record(Action::Insert, output);
        let compiled = self.renderer.compile(template)?;
        patch::insert_after(output, marker, &compiled, data)
    }
}

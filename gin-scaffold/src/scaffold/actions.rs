//! Action reporting for file operations
//!
//! Every create, skip and insert is announced with one line before it happens.

use console::style;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File operation about to be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A new file will be written
    Create,
    /// Destination exists; nothing will be written
    Skip,
    /// Rendered content will be inserted into an existing file
    Insert,
}

impl Action {
    /// Verb shown to the user
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Skip => "skip",
            Self::Insert => "insert",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives action announcements
pub trait ActionSink {
    /// Announce `action` on `path`
    fn record(&self, action: Action, path: &Path);
}

/// Prints colored action lines to stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ActionSink for ConsoleReporter {
    fn record(&self, action: Action, path: &Path) {
        let verb = format!("{:>8}", action.as_str());
        let verb = match action {
            Action::Create => style(verb).green().bold(),
            Action::Skip => style(verb).red().bold(),
            Action::Insert => style(verb).cyan().bold(),
        };
        println!("{verb}  {}", path.display());
    }
}

/// Keeps announcements in memory
///
/// Used by tests to observe what a command announced.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(Action, PathBuf)>>,
}

impl RecordingSink {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Announcements so far, in order
    #[must_use]
    pub fn entries(&self) -> Vec<(Action, PathBuf)> {
        self.entries
            .lock()
            .map_or_else(|_| Vec::new(), |entries| entries.clone())
    }
}

impl ActionSink for RecordingSink {
    fn record(&self, action: Action, path: &Path) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((action, path.to_path_buf()));
        }
    }
}

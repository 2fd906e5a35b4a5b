//! Insert rendered content after a marker line of an existing file
//!
//! The file is streamed into a sibling temporary file which then replaces the
//! original with a rename. If anything fails before the rename, the temporary
//! file is removed and the original is untouched.

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::renderer::CompiledTemplate;
use crate::error::{Result, ScaffoldError};

/// Result of an insert-after pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// Content was inserted after the first matching line
    Inserted,
    /// No line starts with the marker; file was rewritten unchanged
    MarkerMissing,
}

/// Copy `path` line by line, rendering `template` right after the first line
/// starting with `marker`
///
/// Lines are newline-terminated in the output (a trailing `\r` is dropped).
/// A missing marker is not an error.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the temporary file cannot be
/// written, rendering fails, or the final rename fails.
pub fn insert_after<D: Serialize>(
    path: &Path,
    marker: &str,
    template: &CompiledTemplate,
    data: &D,
) -> Result<Insertion> {
    let input = File::open(path).map_err(|err| ScaffoldError::io("open", path, err))?;
    let permissions = input
        .metadata()
        .map_err(|err| ScaffoldError::io("stat", path, err))?
        .permissions();

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = path
        .file_name()
        .map_or_else(String::new, |name| format!(".{}.", name.to_string_lossy()));
    let temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".new")
        .tempfile_in(dir)
        .map_err(|err| ScaffoldError::io("create", dir, err))?;

    let mut insertion = Insertion::MarkerMissing;
    {
        let mut writer = BufWriter::new(temp.as_file());
        for line in BufReader::new(input).split(b'\n') {
            let mut line = line.map_err(|err| ScaffoldError::io("read", path, err))?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            line.push(b'\n');
            writer
                .write_all(&line)
                .map_err(|err| ScaffoldError::io("write", temp.path(), err))?;

            if insertion == Insertion::MarkerMissing && line.starts_with(marker.as_bytes()) {
                tracing::debug!(path = %path.display(), marker, "marker found");
                template.render_to(data, &mut writer)?;
                insertion = Insertion::Inserted;
            }
        }
        writer
            .flush()
            .map_err(|err| ScaffoldError::io("write", temp.path(), err))?;
    }

    if insertion == Insertion::MarkerMissing {
        tracing::debug!(path = %path.display(), marker, "marker not found, nothing inserted");
    }

    fs::set_permissions(temp.path(), permissions)
        .map_err(|err| ScaffoldError::io("chmod", temp.path(), err))?;
    temp.persist(path).map_err(|source| ScaffoldError::Replace {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(insertion)
}

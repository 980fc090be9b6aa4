//! Input selection and file discovery.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, warn};

use super::document::{load_documents, read_stdin, Document};
use super::SourceError;

/// What the user asked to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// A single file, or every matching file of a directory.
    Path { path: PathBuf, extension: String },
    /// The most recently modified matching file of a directory.
    Latest { dir: PathBuf, extension: String },
    /// Standard input.
    Stdin,
}

impl InputSpec {
    /// Load every document this input refers to.
    ///
    /// The outer error aborts the run (nothing to read at all); inner errors
    /// belong to single inputs.
    pub fn load(&self) -> Result<Vec<Result<Document, SourceError>>, SourceError> {
        match self {
            InputSpec::Stdin => Ok(vec![read_stdin()]),
            _ => Ok(load_documents(&resolve_inputs(self)?)),
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Matching files directly inside `dir`, sorted by name.
fn files_in(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, SourceError> {
    let entries = fs::read_dir(dir).map_err(|source| SourceError::Unavailable {
        id: dir.display().to_string(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, extension))
        .collect();
    files.sort();
    Ok(files)
}

/// Most recently modified matching file in `dir`.
pub fn latest_file(dir: &Path, extension: &str) -> Result<PathBuf, SourceError> {
    if !dir.is_dir() {
        return Err(SourceError::DirectoryMissing {
            dir: dir.to_path_buf(),
        });
    }

    files_in(dir, extension)?
        .into_iter()
        .max_by_key(|path| {
            fs::metadata(path)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH)
        })
        .ok_or_else(|| SourceError::NoFiles {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        })
}

/// Paths to read for `spec`. Standard input has no path and yields none.
pub fn resolve_inputs(spec: &InputSpec) -> Result<Vec<PathBuf>, SourceError> {
    match spec {
        InputSpec::Path { path, extension } if path.is_dir() => {
            let files = files_in(path, extension)?;
            if files.is_empty() {
                warn!(dir = %path.display(), extension = %extension, "directory has no matching files");
            }
            debug!(dir = %path.display(), count = files.len(), "resolved directory inputs");
            Ok(files)
        }
        InputSpec::Path { path, .. } => Ok(vec![path.clone()]),
        InputSpec::Latest { dir, extension } => {
            let latest = latest_file(dir, extension)?;
            debug!(file = %latest.display(), "using most recent file");
            Ok(vec![latest])
        }
        InputSpec::Stdin => Ok(Vec::new()),
    }
}

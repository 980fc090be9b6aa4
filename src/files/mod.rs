//! Input discovery and loading.
//!
//! Resolves what the user asked for (a file, a directory, the newest export
//! in a download folder, or stdin) into [`Document`]s. A source that cannot
//! be read fails on its own; the rest of the batch still loads.

mod document;
mod input;

pub use document::{decode_lossy, load_documents, read_stdin, Document};
pub use input::{latest_file, resolve_inputs, InputSpec};

use std::path::PathBuf;

/// Errors raised while locating or reading inputs.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Source unavailable: {id}: {source}")]
    Unavailable {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {}", dir.display())]
    DirectoryMissing { dir: PathBuf },

    #[error("No .{extension} files found in {}", dir.display())]
    NoFiles { dir: PathBuf, extension: String },
}

//! Documents and how their bytes become text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use super::SourceError;

/// One input text, identified by where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Decode bytes as UTF-8, dropping invalid sequences instead of failing.
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}

/// Read each path; failures are reported per input.
pub fn load_documents(paths: &[PathBuf]) -> Vec<Result<Document, SourceError>> {
    paths
        .iter()
        .map(|path| {
            let id = path.display().to_string();
            match fs::read(path) {
                Ok(bytes) => Ok(Document::new(id, decode_lossy(&bytes))),
                Err(source) => Err(SourceError::Unavailable { id, source }),
            }
        })
        .collect()
}

/// Read standard input as one document.
pub fn read_stdin() -> Result<Document, SourceError> {
    let mut bytes = Vec::new();
    std::io::stdin()
        .read_to_end(&mut bytes)
        .map_err(|source| SourceError::Unavailable {
            id: "<stdin>".to_string(),
            source,
        })?;
    Ok(Document::new("<stdin>", decode_lossy(&bytes)))
}

//! Report rendering and persistence.
//!
//! The engine never formats text itself; this module turns the final record
//! list into a text report, JSON or SQL and writes it to disk.

mod sql;
mod text;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::record::Record;

pub use sql::render_sql;
pub use text::{render_text, summary_line};

/// Errors writing a report.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// JSON array of records
    Json,
    /// SQL INSERT statements
    Sql,
}

impl OutputFormat {
    /// File extension for reports in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Sql => "sql",
        }
    }
}

/// Render `records` in `format`. `sql_table` is only used for SQL.
pub fn render(records: &[Record], format: OutputFormat, sql_table: &str) -> Result<String, OutputError> {
    match format {
        OutputFormat::Text => Ok(render_text(records)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Sql => Ok(render_sql(records, sql_table)),
    }
}

/// Write `content` to `dir/file_name.<ext>`, creating `dir`.
pub fn write_report(
    dir: &Path,
    file_name: &str,
    format: OutputFormat,
    content: &str,
) -> Result<PathBuf, OutputError> {
    let path = dir.join(format!("{}.{}", file_name, format.extension()));
    let write_err = |source| OutputError::Write {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(dir).map_err(write_err)?;
    fs::write(&path, content).map_err(write_err)?;
    Ok(path)
}

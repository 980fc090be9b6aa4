//! Format detection and record extraction.
//!
//! A document is claimed by exactly one [`Format`] (the first whose
//! predicate matches), split into blocks by that format, and each block is
//! turned into a [`Record`]. Blocks that yield no field at all are dropped.

mod fields;
mod format;

use tracing::debug;

use crate::normalize::{Normalizer, Speller};
use crate::record::Record;

pub use fields::{extract_record, has_name_label};
pub use format::{Format, DEFAULT_SIGNATURE_MARKER};

/// Read-only services the extractors need.
#[derive(Clone, Copy)]
pub struct ExtractContext<'a> {
    pub normalizer: &'a Normalizer,
    pub speller: Option<&'a dyn Speller>,
    pub signature_marker: &'a str,
}

impl<'a> ExtractContext<'a> {
    /// Context with no speller and the default signature marker.
    pub fn new(normalizer: &'a Normalizer) -> Self {
        Self {
            normalizer,
            speller: None,
            signature_marker: DEFAULT_SIGNATURE_MARKER,
        }
    }

    pub fn with_speller(mut self, speller: Option<&'a dyn Speller>) -> Self {
        self.speller = speller;
        self
    }

    pub fn with_signature_marker(mut self, marker: &'a str) -> Self {
        self.signature_marker = marker;
        self
    }
}

/// Classify `text` and extract its records, in document order.
pub fn detect_and_extract(text: &str, ctx: &ExtractContext<'_>) -> Vec<Record> {
    let text = text.replace("\r\n", "\n");
    let format = Format::detect(&text, ctx.signature_marker);
    let blocks = format.split_blocks(&text, ctx);
    let block_count = blocks.len();

    let records: Vec<Record> = blocks
        .iter()
        .map(|block| extract_record(block))
        .filter(|record| !record.is_empty())
        .collect();

    debug!(
        format = format.name(),
        blocks = block_count,
        records = records.len(),
        "extracted document"
    );
    records
}

//! Batch processing of documents.
//!
//! Each document goes through detection, extraction and age enrichment
//! independently, so a batch is processed in parallel with rayon. The output
//! keeps document order, and record order within each document.

use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::age;
use crate::extract::{detect_and_extract, ExtractContext, DEFAULT_SIGNATURE_MARKER};
use crate::files::Document;
use crate::filter::{self, FilterCriteria};
use crate::normalize::{Normalizer, Speller};
use crate::record::Record;

/// Extraction engine: read-only services shared by all workers.
pub struct Engine {
    normalizer: Normalizer,
    speller: Option<Box<dyn Speller>>,
    signature_marker: String,
    today: Option<NaiveDate>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Normalizer::default())
    }
}

impl Engine {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            speller: None,
            signature_marker: DEFAULT_SIGNATURE_MARKER.to_string(),
            today: None,
        }
    }

    /// Speller for the spelling pass of signature documents.
    pub fn with_speller(mut self, speller: Box<dyn Speller>) -> Self {
        self.speller = Some(speller);
        self
    }

    pub fn with_signature_marker(mut self, marker: impl Into<String>) -> Self {
        self.signature_marker = marker.into();
        self
    }

    /// Pin the reference date for age computation (local date otherwise).
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn context(&self) -> ExtractContext<'_> {
        ExtractContext::new(&self.normalizer)
            .with_speller(self.speller.as_deref())
            .with_signature_marker(&self.signature_marker)
    }

    /// Derive the record's age from its raw birth date.
    pub fn enrich(&self, record: &mut Record) {
        let raw = record.birth_date_raw.as_deref();
        record.age = match self.today {
            Some(today) => age::age_on(raw, today),
            None => age::compute_age(raw),
        };
    }

    /// Extract and enrich the records of one document.
    pub fn extract(&self, document: &Document) -> Vec<Record> {
        let mut records = detect_and_extract(&document.text, &self.context());
        for record in &mut records {
            self.enrich(record);
        }
        debug!(document = %document.id, records = records.len(), "processed document");
        records
    }

    /// Extract every document in parallel, concatenated in input order.
    pub fn extract_all(&self, documents: &[Document]) -> Vec<Record> {
        documents
            .par_iter()
            .map(|document| self.extract(document))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }

    /// Extract every document and keep the records matching `criteria`.
    pub fn process_batch(&self, documents: &[Document], criteria: &FilterCriteria) -> BatchOutcome {
        let records = self.extract_all(documents);
        let extracted = records.len();
        let matched = filter::apply(records, criteria);

        info!(
            documents = documents.len(),
            extracted,
            matched = matched.len(),
            "batch complete"
        );
        BatchOutcome {
            extracted,
            records: matched,
        }
    }
}

/// Result of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Records extracted before filtering.
    pub extracted: usize,
    /// Records that passed the filter, in document order.
    pub records: Vec<Record>,
}

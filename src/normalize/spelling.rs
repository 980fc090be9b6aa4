//! Dictionary-based spelling correction.
//!
//! Used only for the legacy bot export, whose text arrives with OCR-style
//! typos. The speller is constructed once per run and shared read-only.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use deunicode::deunicode;
use tracing::debug;

use super::TextTransform;

/// Embedded Portuguese word-frequency list.
const BUILTIN_WORDS: &str = include_str!("../../data/pt_words.txt");

/// Tokens shorter than this are never corrected (gender letters, "de", ...).
const MIN_CORRECTABLE_LEN: usize = 3;

/// Frequency used for user dictionary entries without an explicit count.
const DEFAULT_USER_FREQUENCY: u64 = 1;

/// Corrects single words.
///
/// Implementations must be read-only after construction so one instance can
/// be shared across worker threads.
pub trait Speller: Send + Sync {
    /// Best correction for a lowercase ASCII word, or `None` if nothing fits.
    fn correct(&self, word: &str) -> Option<String>;
}

/// Errors loading a dictionary file.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Failed to read dictionary {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Speller backed by a word-frequency dictionary.
///
/// Known words are returned unchanged. Unknown words are matched against the
/// dictionary by optimal-string-alignment distance; closer words win, then
/// more frequent ones, then alphabetical order.
#[derive(Debug, Clone)]
pub struct FrequencySpeller {
    frequencies: HashMap<String, u64>,
}

impl FrequencySpeller {
    /// Speller over the embedded word list.
    pub fn builtin() -> Self {
        let mut speller = Self {
            frequencies: HashMap::new(),
        };
        speller.add_words(BUILTIN_WORDS);
        speller
    }

    /// Embedded word list plus the entries of `path`, if given.
    pub fn with_dictionary(path: Option<&Path>) -> Result<Self, DictionaryError> {
        let mut speller = Self::builtin();
        if let Some(path) = path {
            let content = fs::read_to_string(path).map_err(|source| DictionaryError::Read {
                path: path.display().to_string(),
                source,
            })?;
            let added = speller.add_words(&content);
            debug!(path = %path.display(), added, "loaded user dictionary");
        }
        Ok(speller)
    }

    /// Parse `word [frequency]` lines. Blank lines and `#` comments are skipped.
    fn add_words(&mut self, content: &str) -> usize {
        let mut added = 0;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            let frequency = parts
                .next()
                .and_then(|f| f.parse::<u64>().ok())
                .unwrap_or(DEFAULT_USER_FREQUENCY);
            let word = deunicode(word).to_lowercase();
            let entry = self.frequencies.entry(word).or_insert(0);
            *entry = (*entry).max(frequency);
            added += 1;
        }
        added
    }

    /// Number of known words.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Whether `word` is in the dictionary.
    pub fn knows(&self, word: &str) -> bool {
        self.frequencies.contains_key(word)
    }
}

impl Speller for FrequencySpeller {
    fn correct(&self, word: &str) -> Option<String> {
        if self.knows(word) {
            return Some(word.to_string());
        }

        let max_distance = if word.chars().count() <= 4 { 1 } else { 2 };
        let mut best: Option<(usize, u64, &str)> = None;

        for (candidate, &frequency) in &self.frequencies {
            let Some(distance) = osa_distance(word, candidate, max_distance) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((d, f, w)) => {
                    distance < d
                        || (distance == d && frequency > f)
                        || (distance == d && frequency == f && candidate.as_str() < w)
                }
            };
            if better {
                best = Some((distance, frequency, candidate));
            }
        }

        best.map(|(_, _, w)| w.to_string())
    }
}

/// Optimal-string-alignment distance, or `None` if it exceeds `max`.
fn osa_distance(a: &str, b: &str, max: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len().abs_diff(b.len()) > max {
        return None;
    }

    let width = b.len() + 1;
    let mut d = vec![0usize; (a.len() + 1) * width];
    for i in 0..=a.len() {
        d[i * width] = i;
    }
    for (j, cell) in d.iter_mut().enumerate().take(width) {
        *cell = j;
    }

    for i in 1..=a.len() {
        let mut row_min = usize::MAX;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut value = (d[(i - 1) * width + j] + 1)
                .min(d[i * width + j - 1] + 1)
                .min(d[(i - 1) * width + j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                value = value.min(d[(i - 2) * width + j - 2] + 1);
            }
            d[i * width + j] = value;
            row_min = row_min.min(value);
        }
        if row_min > max {
            return None;
        }
    }

    let distance = d[a.len() * width + b.len()];
    (distance <= max).then_some(distance)
}

/// Correct one whitespace-delimited token, keeping surrounding punctuation.
fn correct_token(token: &str, speller: &dyn Speller) -> String {
    let start = token
        .find(|c: char| c.is_ascii_alphanumeric())
        .unwrap_or(token.len());
    let end = token
        .rfind(|c: char| c.is_ascii_alphanumeric())
        .map(|i| i + 1)
        .unwrap_or(start);
    if start >= end {
        return token.to_string();
    }

    let core = &token[start..end];
    if core.len() < MIN_CORRECTABLE_LEN || !core.chars().all(|c| c.is_ascii_alphabetic()) {
        return token.to_string();
    }

    match speller.correct(core) {
        Some(fixed) => format!("{}{}{}", &token[..start], fixed, &token[end..]),
        None => token.to_string(),
    }
}

/// Spelling pass over a whole text, line by line.
///
/// Transliterates, lowercases, corrects each token, collapses whitespace and
/// upper-cases the result. Line structure is preserved.
pub fn correct_spelling(text: &str, speller: &dyn Speller) -> String {
    deunicode(text)
        .to_lowercase()
        .lines()
        .map(|line| {
            line.split_whitespace()
                .map(|token| correct_token(token, speller))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .to_uppercase()
}

/// Transform wrapper for [`correct_spelling`].
pub struct CorrectSpelling<'a> {
    speller: &'a dyn Speller,
}

impl<'a> CorrectSpelling<'a> {
    pub fn new(speller: &'a dyn Speller) -> Self {
        Self { speller }
    }
}

impl TextTransform for CorrectSpelling<'_> {
    fn transform(&self, text: &mut String) {
        *text = correct_spelling(text, self.speller);
    }
}

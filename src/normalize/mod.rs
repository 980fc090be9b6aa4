//! Text normalization pipeline.
//!
//! Raw exports arrive mis-decoded, decorated with emoji and padded with
//! "no data" placeholder lines. The [`Normalizer`] runs a fixed sequence of
//! transforms over a document:
//!
//! 1. [`RepairEncoding`] - undo UTF-8/Latin-1 double decoding
//! 2. [`RestrictAlphabet`] - keep ASCII only, drop template artifacts
//! 3. [`DropNoiseLines`] - remove blank and placeholder lines
//! 4. [`CorrectSpelling`] - optional, dictionary correction per token
//!
//! Each stage is a [`TextTransform`] and can be used on its own.

mod encoding;
mod spelling;

use deunicode::deunicode;

pub use encoding::{repair_encoding, RepairEncoding};
pub use spelling::{correct_spelling, CorrectSpelling, DictionaryError, FrequencySpeller, Speller};

/// A single in-place text rewrite.
pub trait TextTransform {
    fn transform(&self, text: &mut String);
}

/// Placeholder phrases that mean "no data" in the known exports.
pub const DEFAULT_NOISE_PHRASES: &[&str] = &["sem informacao", "sem informação", "nenhum", "zero"];

/// Template artifact left behind by one producer's "CPF/CNPJ" header.
const CNPJ_MARKER: &str = "/CNPJ";

/// Case- and accent-insensitive set of noise phrases.
#[derive(Debug, Clone)]
pub struct NoisePhrases {
    folded: Vec<String>,
}

impl Default for NoisePhrases {
    fn default() -> Self {
        Self::with_extra(std::iter::empty::<&str>())
    }
}

impl NoisePhrases {
    /// Default phrases merged with `extra`.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut folded: Vec<String> = Vec::new();
        let defaults = DEFAULT_NOISE_PHRASES.iter().map(|p| p.to_string());
        let extras = extra.into_iter().map(|p| p.as_ref().to_string());
        // Lines reach the noise stage with accents already dropped, so the
        // stripped spelling is matched as well.
        for phrase in defaults.chain(extras) {
            for form in [fold(&phrase), strip_non_ascii(&phrase)] {
                if !form.is_empty() && !folded.contains(&form) {
                    folded.push(form);
                }
            }
        }
        Self { folded }
    }

    /// Whether `text` contains any phrase.
    pub fn matches(&self, text: &str) -> bool {
        let text = fold(text);
        self.folded.iter().any(|phrase| text.contains(phrase.as_str()))
    }

    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }
}

fn fold(text: &str) -> String {
    deunicode(text).to_lowercase().trim().to_string()
}

fn strip_non_ascii(text: &str) -> String {
    let ascii: String = text.chars().filter(char::is_ascii).collect();
    ascii.to_lowercase().trim().to_string()
}

/// Keeps ASCII characters only and removes the `/CNPJ` template artifact.
///
/// With `transliterate`, accented letters become their closest ASCII form
/// instead of being dropped.
pub struct RestrictAlphabet {
    pub transliterate: bool,
}

impl TextTransform for RestrictAlphabet {
    fn transform(&self, text: &mut String) {
        let source = if self.transliterate {
            transliterate_keep_lines(text)
        } else {
            std::mem::take(text)
        };
        *text = source
            .replace(CNPJ_MARKER, "")
            .chars()
            .filter(char::is_ascii)
            .collect();
    }
}

/// Transliterate each line separately so deunicode never merges lines.
fn transliterate_keep_lines(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            line.chars()
                .map(|c| {
                    if c.is_ascii() {
                        c.to_string()
                    } else {
                        deunicode::deunicode_char(c).unwrap_or("").to_string()
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drops blank lines and lines containing a noise phrase; trims the rest.
pub struct DropNoiseLines<'a> {
    phrases: &'a NoisePhrases,
}

impl<'a> DropNoiseLines<'a> {
    pub fn new(phrases: &'a NoisePhrases) -> Self {
        Self { phrases }
    }
}

impl TextTransform for DropNoiseLines<'_> {
    fn transform(&self, text: &mut String) {
        *text = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !self.phrases.matches(line))
            .collect::<Vec<_>>()
            .join("\n");
    }
}

/// The full normalization pipeline.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    noise: NoisePhrases,
    transliterate: bool,
}

impl Normalizer {
    pub fn new(noise: NoisePhrases) -> Self {
        Self {
            noise,
            transliterate: false,
        }
    }

    /// Transliterate accented letters instead of dropping them.
    pub fn with_transliteration(mut self, transliterate: bool) -> Self {
        self.transliterate = transliterate;
        self
    }

    pub fn noise(&self) -> &NoisePhrases {
        &self.noise
    }

    /// Stages 1-3: encoding repair, alphabet restriction, noise-line removal.
    pub fn clean(&self, text: &str) -> String {
        let mut text = text.to_string();
        RepairEncoding.transform(&mut text);
        RestrictAlphabet {
            transliterate: self.transliterate,
        }
        .transform(&mut text);
        DropNoiseLines::new(&self.noise).transform(&mut text);
        text
    }

    /// Full pipeline; the spelling pass runs only when a speller is given.
    pub fn normalize(&self, text: &str, speller: Option<&dyn Speller>) -> String {
        let mut text = self.clean(text);
        if let Some(speller) = speller {
            CorrectSpelling::new(speller).transform(&mut text);
        }
        text
    }
}

//! Document shapes and how each one is split into record blocks.

use std::sync::OnceLock;

use regex::Regex;

use super::fields::has_name_label;
use super::ExtractContext;

/// Attribution line written by the legacy search bot.
pub const DEFAULT_SIGNATURE_MARKER: &str = "BY: @AnoninoBuscasOfcBot";

fn blank_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\n").expect("blank line regex is valid"))
}

/// `• RESULTADO: <n>`; both detection and splitting need the number.
fn numbered_result_header() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)•\s*RESULT(?:ADO)?\s*:\s*\d+").expect("numbered header regex is valid")
    })
}

/// A `Nome:` label at the start of a line, optionally behind a bullet or
/// person glyph.
fn name_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[👤•\s]*(?:NOME|NAME)\s*:\s*").expect("name line regex is valid")
    })
}

/// Known document shapes, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Legacy bot export, identified by its attribution marker.
    Signature,
    /// Results introduced by `• RESULTADO: <n>` headers.
    Delimited,
    /// Anything else: one record per `Nome:` line.
    Generic,
}

impl Format {
    /// Detection order. `Generic` is last and always matches.
    pub const ALL: [Format; 3] = [Format::Signature, Format::Delimited, Format::Generic];

    /// Whether this format claims `text`.
    pub fn matches(&self, text: &str, signature_marker: &str) -> bool {
        match self {
            Format::Signature => !signature_marker.is_empty() && text.contains(signature_marker),
            Format::Delimited => numbered_result_header().is_match(text),
            Format::Generic => true,
        }
    }

    /// First format that claims `text`.
    pub fn detect(text: &str, signature_marker: &str) -> Format {
        Self::ALL
            .into_iter()
            .find(|format| format.matches(text, signature_marker))
            .unwrap_or(Format::Generic)
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Signature => "signature",
            Format::Delimited => "delimited",
            Format::Generic => "generic",
        }
    }

    /// Split `text` into blocks ready for field extraction.
    pub fn split_blocks(&self, text: &str, ctx: &ExtractContext<'_>) -> Vec<String> {
        match self {
            Format::Signature => blank_line()
                .split(text)
                .map(|block| ctx.normalizer.normalize(block, ctx.speller))
                .filter(|block| !block.is_empty())
                .collect(),
            Format::Delimited => numbered_result_header()
                .split(text)
                .filter(|segment| has_name_label(segment))
                .map(str::to_string)
                .collect(),
            Format::Generic => name_line()
                .split(text)
                .skip(1)
                .map(|segment| format!("Nome: {}", segment.trim_end()))
                .collect(),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

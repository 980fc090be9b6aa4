//! Label-driven field extraction from a single record block.
//!
//! Every known producer writes fields as `LABEL: value`, but they disagree on
//! line breaks: some put each field on its own line, others run several
//! fields together. A value therefore ends at the line break or at the next
//! known label, whichever comes first.

use std::sync::OnceLock;

use regex::Regex;

use crate::record::{non_empty, Gender, Record, ENTITY_TAX_ID_LEN, INDIVIDUAL_TAX_ID_LEN};

/// Any label that can start a field; used to cut a value short.
fn any_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\b(?:DATA DE NASCIMENTO|NASCIMENTO|NOME|NAME|(?:CPF|CNPJ)(?:\s*/\s*(?:CPF|CNPJ))?|SEXO|GENDER)\s*:",
        )
        .expect("label regex is valid")
    })
}

fn name_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:NOME|NAME)\s*:").expect("name regex is valid"))
}

/// Tax-id labels: `CPF:`, `CNPJ:` or a combined `CPF/CNPJ:` header.
fn tax_id_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(CPF|CNPJ)(\s*/\s*(?:CPF|CNPJ))?\s*:").expect("tax id regex is valid")
    })
}

fn birth_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:DATA DE NASCIMENTO|NASCIMENTO)\s*:").expect("birth regex is valid")
    })
}

fn gender_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(?:SEXO|GENDER)\s*:").expect("gender regex is valid"))
}

/// First run of digits, optionally punctuated (`123.456.789-01`).
fn digit_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d[\d./\-]*").expect("digit regex is valid"))
}

/// Leading date-like span: digits and separators.
fn date_span() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d/.\-\s]+").expect("date regex is valid"))
}

/// Whether `block` carries a name label.
pub fn has_name_label(block: &str) -> bool {
    name_label().is_match(&block.to_uppercase())
}

/// Value following the label that ends at `label_end`.
fn value_after(text: &str, label_end: usize) -> &str {
    let rest = &text[label_end..];
    let line = rest.split('\n').next().unwrap_or("");
    let line = match any_label().find(line) {
        Some(next) => &line[..next.start()],
        None => line,
    };
    line.trim()
}

/// Value of the first occurrence of `label` in `text`.
fn labelled_value<'t>(text: &'t str, label: &Regex) -> Option<&'t str> {
    label.find(text).map(|m| value_after(text, m.end()))
}

fn extract_tax_id(text: &str) -> Option<String> {
    let mut entity = None;

    for caps in tax_id_label().captures_iter(text) {
        let (Some(whole), Some(kind)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let combined = caps.get(2).is_some();
        let value = value_after(text, whole.end());
        let Some(run) = digit_run().find(value) else {
            continue;
        };
        let digits: String = run.as_str().chars().filter(char::is_ascii_digit).collect();

        let individual = digits.len() == INDIVIDUAL_TAX_ID_LEN && (combined || kind.as_str() == "CPF");
        if individual {
            return Some(digits);
        }
        let is_entity = digits.len() == ENTITY_TAX_ID_LEN && (combined || kind.as_str() == "CNPJ");
        if is_entity && entity.is_none() {
            entity = Some(digits);
        }
    }
    entity
}

fn extract_birth_date(text: &str) -> Option<String> {
    let value = labelled_value(text, birth_label())?;
    let span = date_span().find(value)?;
    non_empty(span.as_str()).filter(|raw| raw.chars().any(|c| c.is_ascii_digit()))
}

fn extract_gender(text: &str) -> Option<Gender> {
    let value = labelled_value(text, gender_label())?;
    let word = value
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())?;
    Gender::parse(word)
}

/// Extract every field of one block.
///
/// The block is upper-cased before matching, so labels are case-insensitive
/// and the returned name is upper case. A field is absent only when its
/// label is missing or its value is empty.
pub fn extract_record(block: &str) -> Record {
    let text = block.to_uppercase();

    Record {
        name: labelled_value(&text, name_label()).and_then(non_empty),
        tax_id: extract_tax_id(&text),
        birth_date_raw: extract_birth_date(&text),
        gender: extract_gender(&text),
        age: None,
    }
}

//! Mojibake repair.
//!
//! Exports that went through a UTF-8 → Latin-1/Windows-1252 round trip show
//! up as `JoÃ£o` instead of `João`. Each run of characters that has a
//! single-byte encoding is turned back into bytes and re-decoded as UTF-8.
//! Sequences that do not form valid UTF-8 keep their original characters.

use super::TextTransform;

/// Maximum number of repair passes (text can be mis-decoded more than once).
const MAX_PASSES: usize = 3;

/// Windows-1252 characters in the 0x80..=0x9F range.
///
/// Latin-1 maps these bytes to C1 control characters; Windows-1252 maps most
/// of them to typographic symbols, which is what mis-decoded text contains.
const CP1252_HIGH: &[(char, u8)] = &[
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Byte a character would have been decoded from, if it is a non-ASCII
/// single-byte character in Latin-1 or Windows-1252.
fn single_byte(c: char) -> Option<u8> {
    let code = c as u32;
    if (0x80..=0xFF).contains(&code) {
        return Some(code as u8);
    }
    CP1252_HIGH
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, byte)| *byte)
}

/// Re-decode one run of single-byte characters.
fn repair_run(run: &[char], out: &mut String) {
    let bytes: Vec<u8> = run.iter().filter_map(|c| single_byte(*c)).collect();
    let mut rest: &[u8] = &bytes;
    // Bytes and run characters are 1:1, so `idx` tracks both.
    let mut idx = 0;

    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(decoded) => {
                out.push_str(decoded);
                break;
            }
            Err(e) => {
                let valid = e.valid_up_to();
                if let Ok(decoded) = std::str::from_utf8(&rest[..valid]) {
                    out.push_str(decoded);
                }
                idx += valid;
                let bad = e.error_len().unwrap_or(rest.len() - valid);
                out.extend(&run[idx..idx + bad]);
                idx += bad;
                rest = &rest[valid + bad..];
            }
        }
    }
}

fn repair_pass(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run: Vec<char> = Vec::new();

    for c in text.chars() {
        if single_byte(c).is_some() {
            run.push(c);
            continue;
        }
        if !run.is_empty() {
            repair_run(&run, &mut out);
            run.clear();
        }
        out.push(c);
    }
    if !run.is_empty() {
        repair_run(&run, &mut out);
    }
    out
}

/// Best-effort repair of double-encoded text. Never fails.
pub fn repair_encoding(text: &str) -> String {
    let mut current = repair_pass(text);
    for _ in 1..MAX_PASSES {
        let next = repair_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Transform wrapper for [`repair_encoding`].
pub struct RepairEncoding;

impl TextTransform for RepairEncoding {
    fn transform(&self, text: &mut String) {
        *text = repair_encoding(text);
    }
}

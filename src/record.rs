//! Canonical person record produced by the extractors.
//!
//! Every field is optional: `None` is the single representation of
//! "could not be determined". Extractors never store empty strings.

use serde::{Deserialize, Serialize};

/// Length of an individual tax identifier (CPF).
pub const INDIVIDUAL_TAX_ID_LEN: usize = 11;

/// Length of an entity tax identifier (CNPJ).
pub const ENTITY_TAX_ID_LEN: usize = 14;

/// Gender as found in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Parse a gender value as written in source exports.
    ///
    /// Accepts the single letters `M`/`F` and the spelled-out forms used by
    /// the known producers. Anything else is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "M" | "MASC" | "MASCULINO" | "MALE" => Some(Gender::M),
            "F" | "FEM" | "FEMININO" | "FEMALE" => Some(Gender::F),
            _ => None,
        }
    }

    /// Single-letter code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of tax identifier, derived from its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxIdKind {
    /// 11-digit CPF
    Individual,
    /// 14-digit CNPJ
    Entity,
}

/// One extracted person entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub birth_date_raw: Option<String>,
    pub gender: Option<Gender>,
    /// Derived from `birth_date_raw` by the engine, never read from source.
    pub age: Option<u32>,
}

impl Record {
    /// True when no field could be extracted at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.tax_id.is_none()
            && self.birth_date_raw.is_none()
            && self.gender.is_none()
    }

    /// Which kind of tax identifier this record carries, if any.
    pub fn tax_id_kind(&self) -> Option<TaxIdKind> {
        match self.tax_id.as_deref().map(str::len) {
            Some(INDIVIDUAL_TAX_ID_LEN) => Some(TaxIdKind::Individual),
            Some(ENTITY_TAX_ID_LEN) => Some(TaxIdKind::Entity),
            _ => None,
        }
    }
}

/// Turn a captured value into a field: trimmed, with empty meaning absent.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

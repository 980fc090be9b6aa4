//! Record filtering.
//!
//! A record is kept when it passes the name, gender and age predicates of a
//! [`FilterCriteria`]. Unknown ages only pass the unrestricted default range,
//! so "show everything" queries include them while narrowed queries do not.

use serde::{Deserialize, Serialize};

use crate::record::{Gender, Record};

/// Lower bound of the default age range.
pub const DEFAULT_MIN_AGE: u32 = 0;

/// Upper bound of the default age range.
pub const DEFAULT_MAX_AGE: u32 = 150;

/// How the name pattern is compared against record names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NameMode {
    /// Whole name must equal the pattern
    #[default]
    #[value(alias = "exato")]
    Exact,
    /// Pattern may appear anywhere in the name
    #[value(alias = "contem")]
    Contains,
    /// Name must begin with the pattern
    #[value(alias = "comeca")]
    StartsWith,
}

/// Errors building filter criteria.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("Minimum age {min} is greater than maximum age {max}")]
    InvertedAgeRange { min: u32, max: u32 },
}

/// Immutable filter settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    name_pattern: String,
    name_mode: NameMode,
    gender: Option<Gender>,
    min_age: u32,
    max_age: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            name_pattern: String::new(),
            name_mode: NameMode::Exact,
            gender: None,
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl FilterCriteria {
    /// Validated criteria. The name pattern is trimmed.
    pub fn new(
        name_pattern: impl Into<String>,
        name_mode: NameMode,
        gender: Option<Gender>,
        min_age: u32,
        max_age: u32,
    ) -> Result<Self, CriteriaError> {
        if min_age > max_age {
            return Err(CriteriaError::InvertedAgeRange {
                min: min_age,
                max: max_age,
            });
        }
        Ok(Self {
            name_pattern: name_pattern.into().trim().to_string(),
            name_mode,
            gender,
            min_age,
            max_age,
        })
    }

    pub fn name_pattern(&self) -> &str {
        &self.name_pattern
    }

    pub fn name_mode(&self) -> NameMode {
        self.name_mode
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn min_age(&self) -> u32 {
        self.min_age
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    /// Whether the age range is the unrestricted default.
    pub fn is_default_age_range(&self) -> bool {
        self.min_age == DEFAULT_MIN_AGE && self.max_age == DEFAULT_MAX_AGE
    }
}

fn name_matches(name: Option<&str>, criteria: &FilterCriteria) -> bool {
    if criteria.name_pattern.is_empty() {
        return true;
    }
    let Some(name) = name else {
        return false;
    };

    let name = name.to_uppercase();
    let pattern = criteria.name_pattern.to_uppercase();
    match criteria.name_mode {
        NameMode::Exact => name == pattern,
        NameMode::Contains => name.contains(&pattern),
        NameMode::StartsWith => name.starts_with(&pattern),
    }
}

fn gender_matches(gender: Option<Gender>, criteria: &FilterCriteria) -> bool {
    match criteria.gender {
        None => true,
        Some(wanted) => gender == Some(wanted),
    }
}

fn age_matches(age: Option<u32>, criteria: &FilterCriteria) -> bool {
    match age {
        Some(age) => (criteria.min_age..=criteria.max_age).contains(&age),
        None => criteria.is_default_age_range(),
    }
}

/// Whether `record` satisfies every predicate of `criteria`.
pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    name_matches(record.name.as_deref(), criteria)
        && gender_matches(record.gender, criteria)
        && age_matches(record.age, criteria)
}

/// Keep the matching records, preserving order.
pub fn apply(records: Vec<Record>, criteria: &FilterCriteria) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| matches(record, criteria))
        .collect()
}

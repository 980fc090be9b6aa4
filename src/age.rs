//! Age derivation from raw birth-date strings.
//!
//! Sources write birth dates as `01/01/1990`, `1990-01-01`, `011990`,
//! `1990`, or with single-digit day and month (`1/1/1990`). The digits are
//! interpreted with a fixed list of layouts; the first layout that forms a
//! valid calendar date wins.

use chrono::{Datelike, Local, NaiveDate};

/// Digit layouts tried in order, with the number of digits each consumes.
///
/// Day-first comes before year-first because the source population writes
/// dates that way; shorter layouts can only encode partial dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    DayMonthYear,
    YearMonthDay,
    MonthYear,
    Year,
}

impl Layout {
    const ORDER: [Layout; 4] = [
        Layout::DayMonthYear,
        Layout::YearMonthDay,
        Layout::MonthYear,
        Layout::Year,
    ];

    fn len(&self) -> usize {
        match self {
            Layout::DayMonthYear | Layout::YearMonthDay => 8,
            Layout::MonthYear => 6,
            Layout::Year => 4,
        }
    }

    /// Parse the first `len()` digits, if there are enough of them.
    fn parse(&self, digits: &str) -> Option<NaiveDate> {
        let part = digits.get(..self.len())?;
        let num = |range: std::ops::Range<usize>| part.get(range)?.parse::<u32>().ok();

        let (year, month, day) = match self {
            Layout::DayMonthYear => (num(4..8)?, num(2..4)?, num(0..2)?),
            Layout::YearMonthDay => (num(0..4)?, num(4..6)?, num(6..8)?),
            Layout::MonthYear => (num(2..6)?, num(0..2)?, 1),
            Layout::Year => (num(0..4)?, 1, 1),
        };
        if year == 0 {
            return None;
        }
        NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
    }
}

/// Digits of `raw`, with 1-digit day/month groups zero-padded when the
/// value is written with separators (`1/2/1990` → `01021990`).
fn date_digits(raw: &str) -> String {
    let groups: Vec<&str> = raw
        .split(|c: char| !c.is_ascii_digit())
        .filter(|g| !g.is_empty())
        .collect();

    let separated = (2..=3).contains(&groups.len()) && groups.iter().all(|g| g.len() <= 4);
    if separated {
        groups
            .iter()
            .map(|g| {
                if g.len() == 1 {
                    format!("0{}", g)
                } else {
                    (*g).to_string()
                }
            })
            .collect()
    } else {
        groups.concat()
    }
}

/// Parse a raw birth date into a calendar date.
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let digits = date_digits(raw);
    Layout::ORDER.iter().find_map(|layout| layout.parse(&digits))
}

/// Age in whole years on `today`.
///
/// Future dates clamp to 0. Only absent or unparsable values yield `None`;
/// a corrupt but parsable date keeps its (large) age so range filters can
/// reject it.
pub fn age_on(raw: Option<&str>, today: NaiveDate) -> Option<u32> {
    let birth = parse_birth_date(raw?)?;
    let before_birthday = (today.month(), today.day()) < (birth.month(), birth.day());
    let age = today.year() - birth.year() - i32::from(before_birthday);
    u32::try_from(age.max(0)).ok()
}

/// Age in whole years as of the local date.
pub fn compute_age(raw: Option<&str>) -> Option<u32> {
    age_on(raw, Local::now().date_naive())
}

//! Dates from journal page names such as `2024-03-15` or `15/3`.
//!
//! Recognised shapes, where `-` can be any single non-digit:
//!
//! - `d-m` and `d-m-y` (day first; year with 1 to 4 digits)
//! - `yyyy-m-d` (a four digit first number means year first)
//!
//! Text before and after the date is ignored. Only ASCII digits count.

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// A `(year, month, day)` triple as written. Month and day are not range
/// checked; see [`ParsedDate::to_naive_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl ParsedDate {
    /// The calendar date, or `None` for impossible triples like `31-02`.
    pub fn to_naive_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<ParsedDate> for (i32, u32, u32) {
    fn from(date: ParsedDate) -> Self {
        (date.year, date.month, date.day)
    }
}

/// How to pick the year when a date has none.
///
/// Journal pages are usually named for recent or upcoming days. When the
/// month lies `rollover_months` or more before the current month, it is taken
/// to mean that month next year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearPolicy {
    pub rollover_months: u32,
}

impl Default for YearPolicy {
    fn default() -> Self {
        Self { rollover_months: 6 }
    }
}

impl YearPolicy {
    fn infer_year(self, month: u32, today: NaiveDate) -> i32 {
        let behind = i64::from(today.month()) - i64::from(month);
        if behind >= i64::from(self.rollover_months) {
            today.year() + 1
        } else {
            today.year()
        }
    }
}

fn date_regex() -> &'static Regex {
    static DATE: OnceLock<Regex> = OnceLock::new();
    DATE.get_or_init(|| {
        Regex::new(r"([0-9]{1,4})[^0-9]([0-9]{1,2})(?:[^0-9]([0-9]{1,4}))?")
            .expect("Invalid date regex")
    })
}

/// Parses a date relative to the local calendar date.
pub fn parse_date(text: &str) -> Option<ParsedDate> {
    parse_date_on(text, Local::now().date_naive(), YearPolicy::default())
}

/// Parses a date, filling in a missing year from `today` and `policy`.
///
/// Two digit years below 50 are 20xx, other years below 1000 are 19xx.
/// Returns `None` when no date is found or when the day is missing
/// (`yyyy-mm`).
pub fn parse_date_on(text: &str, today: NaiveDate, policy: YearPolicy) -> Option<ParsedDate> {
    let Some(caps) = date_regex().captures(text) else {
        log::trace!("No date in {text:?}");
        return None;
    };

    let first = caps.get(1)?.as_str();
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let third = caps.get(3).map(|m| m.as_str());

    let (day, year) = if first.len() == 4 {
        (third, Some(first))
    } else {
        (Some(first), third)
    };

    let Some(day) = day else {
        log::trace!("Date {text:?} has no day");
        return None;
    };
    let day: u32 = day.parse().ok()?;

    let year = match year {
        Some(year) => normalize_year(year.parse().ok()?),
        None => policy.infer_year(month, today),
    };

    Some(ParsedDate { year, month, day })
}

fn normalize_year(year: i32) -> i32 {
    if year < 50 {
        year + 2000
    } else if year < 1000 {
        year + 1900
    } else {
        year
    }
}

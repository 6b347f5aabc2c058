//! Chronological split of a record set around a birth year.
//!
//! Records are stable-sorted once by birth date and then classified by the
//! calendar year of that date, so each side comes out in date order.
//! A birth date that cannot be parsed sorts after every parseable date and
//! lands on the `after` side.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use shared::domain::{UserId, UserRecord};

pub const DEFAULT_SPLIT_YEAR: i32 = 2000;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSide {
    Before,
    After,
}

/// The two ordered sub-lists derived from a record set. Always rebuilt wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedViews {
    pub before: Vec<UserRecord>,
    pub after: Vec<UserRecord>,
}

impl DerivedViews {
    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// Every record, `before` first, in display order.
    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.before.iter().chain(self.after.iter())
    }

    pub fn side_of(&self, id: UserId) -> Option<ViewSide> {
        if self.before.iter().any(|record| record.id == id) {
            Some(ViewSide::Before)
        } else if self.after.iter().any(|record| record.id == id) {
            Some(ViewSide::After)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    split_year: i32,
}

impl Default for Partitioner {
    fn default() -> Self {
        Self::new(DEFAULT_SPLIT_YEAR)
    }
}

impl Partitioner {
    pub fn new(split_year: i32) -> Self {
        Self { split_year }
    }

    pub fn split_year(&self) -> i32 {
        self.split_year
    }

    pub fn partition(&self, records: &[UserRecord]) -> DerivedViews {
        let mut keyed: Vec<(Option<NaiveDateTime>, &UserRecord)> = records
            .iter()
            .map(|record| (parse_birth_date(&record.birth_date), record))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b));

        let mut views = DerivedViews::default();
        for (key, record) in keyed {
            match self.side_for_key(key) {
                ViewSide::Before => views.before.push(record.clone()),
                ViewSide::After => views.after.push(record.clone()),
            }
        }
        views
    }

    /// Side a record with this birth date is classified into.
    pub fn side_for(&self, birth_date: &str) -> ViewSide {
        match birth_year(birth_date) {
            Some(year) if year < self.split_year => ViewSide::Before,
            _ => ViewSide::After,
        }
    }

    fn side_for_key(&self, key: Option<NaiveDateTime>) -> ViewSide {
        match key {
            Some(born) if born.year() < self.split_year => ViewSide::Before,
            _ => ViewSide::After,
        }
    }
}

/// Splits with the default year.
pub fn partition(records: &[UserRecord]) -> DerivedViews {
    Partitioner::default().partition(records)
}

fn compare_keys(a: &Option<NaiveDateTime>, b: &Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn parse_birth_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_local());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Milliseconds since the Unix epoch of the wall-clock time as written.
pub fn birth_time_millis(raw: &str) -> Option<i64> {
    parse_birth_date(raw).map(|born| born.and_utc().timestamp_millis())
}

pub fn birth_year(raw: &str) -> Option<i32> {
    parse_birth_date(raw).map(|born| born.year())
}

#[cfg(test)]
#[path = "tests/partition_tests.rs"]
mod tests;

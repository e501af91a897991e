//! Date bounds and month keys
//!
//! Month keys are always 7-character `YYYY-MM` strings, so lexicographic
//! order is chronological order.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

use super::transaction::Transaction;
use crate::error::{MintedError, MintedResult};

/// A half-open date range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range; `start` must be before `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> MintedResult<Self> {
        if start >= end {
            return Err(MintedError::Validation(format!(
                "Date range start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str) -> MintedResult<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Smallest range containing every transaction date
    pub fn covering(transactions: &[Transaction]) -> Option<Self> {
        let first = transactions.iter().map(|t| t.date).min()?;
        let last = transactions.iter().map(|t| t.date).max()?;
        Some(Self {
            start: first,
            end: last + Duration::days(1),
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

pub fn parse_date(s: &str) -> MintedResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| MintedError::Validation(format!("Invalid date '{}': {}", s, e)))
}

/// `YYYY-MM` key for a date
pub fn month_of(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// `YYYY` part of a month key
pub fn year_of(month: &str) -> &str {
    month.get(..4).unwrap_or(month)
}

/// Two-digit `MM` part of a month key
pub fn month_number(month: &str) -> &str {
    month.get(5..7).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_is_half_open() {
        let range = DateRange::parse("2024-01-01", "2024-02-01").unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(DateRange::parse("2024-02-01", "2024-01-01").is_err());
        assert!(DateRange::parse("2024-01-01", "2024-01-01").is_err());
        assert!(DateRange::parse("January", "2024-01-01").is_err());
    }

    #[test]
    fn test_month_keys() {
        let month = month_of(date(2023, 7, 14));
        assert_eq!(month, "2023-07");
        assert_eq!(month.len(), 7);
        assert_eq!(year_of(&month), "2023");
        assert_eq!(month_number(&month), "07");
    }

    #[test]
    fn test_covering() {
        let txns = vec![
            Transaction::new(date(2024, 3, 5), "b"),
            Transaction::new(date(2024, 1, 9), "a"),
        ];
        let range = DateRange::covering(&txns).unwrap();
        assert_eq!(range.start, date(2024, 1, 9));
        assert_eq!(range.end, date(2024, 3, 6));
        assert!(DateRange::covering(&[]).is_none());
    }
}

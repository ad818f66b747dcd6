//! Reporting period covered by a deck.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive date range shown in the summary subtitle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportingPeriod {
    /// Create a period; the endpoints are ordered if given backwards.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Number of calendar days in the period (at least 1).
    pub fn days(&self) -> u64 {
        (self.end - self.start).num_days().max(0) as u64 + 1
    }

    /// The `index`-th day, cycling through the period.
    pub fn cycle_date(&self, index: usize) -> NaiveDate {
        let offset = index as u64 % self.days();
        self.start
            .checked_add_days(Days::new(offset))
            .unwrap_or(self.start)
    }

    /// Human-readable range, e.g. `January 1 - 14, 2025`.
    pub fn label(&self) -> String {
        let (s, e) = (self.start, self.end);
        if s.year() == e.year() && s.month() == e.month() {
            format!("{} {} - {}, {}", s.format("%B"), s.day(), e.day(), s.year())
        } else if s.year() == e.year() {
            format!("{} - {}, {}", s.format("%B %-d"), e.format("%B %-d"), s.year())
        } else {
            format!("{} - {}", s.format("%B %-d, %Y"), e.format("%B %-d, %Y"))
        }
    }

    /// Summary slide subtitle.
    pub fn subtitle(&self) -> String {
        format!("Reporting Period: {}", self.label())
    }
}

impl Default for ReportingPeriod {
    /// January 1 - 14, 2025.
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid calendar date");
        let end = NaiveDate::from_ymd_opt(2025, 1, 14).expect("valid calendar date");
        Self { start, end }
    }
}

/// Short contact-log date, e.g. `1/3/25`.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%y").to_string()
}

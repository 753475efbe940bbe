//! Billing period types.
//!
//! Every date range in the system is half-open: `[start, end)`. A period
//! covering January 2024 runs from 2024-01-01 to 2024-02-01 exclusive and
//! contains 31 chargeable days.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A half-open billing period `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// First day of the period (inclusive).
    pub start: NaiveDate,
    /// First day after the period (exclusive).
    pub end: NaiveDate,
}

impl BillingPeriod {
    /// Creates a period from explicit bounds. Returns `None` unless
    /// `start < end`.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Creates the period covering one calendar month.
    #[must_use]
    pub fn calendar_month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some(Self { start, end })
    }

    /// Number of days in the period.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Last day inside the period (inclusive), for display.
    #[must_use]
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.start)
    }

    /// Payment due date: period end plus the payment terms.
    #[must_use]
    pub fn due_date(&self, payment_terms_days: u16) -> NaiveDate {
        self.last_day()
            .checked_add_days(Days::new(u64::from(payment_terms_days)))
            .unwrap_or(self.end)
    }

    /// Display name, e.g. "January 2024".
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} {}", month_name(self.start.month()), self.start.year())
    }
}

/// Returns month name.
fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_month_january() {
        let period = BillingPeriod::calendar_month(2024, 1).unwrap();
        assert_eq!(period.start, date(2024, 1, 1));
        assert_eq!(period.end, date(2024, 2, 1));
        assert_eq!(period.days(), 31);
        assert_eq!(period.name(), "January 2024");
    }

    #[test]
    fn test_calendar_month_december_wraps_year() {
        let period = BillingPeriod::calendar_month(2024, 12).unwrap();
        assert_eq!(period.end, date(2025, 1, 1));
        assert_eq!(period.days(), 31);
    }

    #[test]
    fn test_leap_february() {
        let period = BillingPeriod::calendar_month(2024, 2).unwrap();
        assert_eq!(period.days(), 29);
    }

    #[test]
    fn test_new_rejects_empty_period() {
        assert!(BillingPeriod::new(date(2024, 1, 1), date(2024, 1, 1)).is_none());
        assert!(BillingPeriod::new(date(2024, 2, 1), date(2024, 1, 1)).is_none());
    }

    #[test]
    fn test_contains_date_is_half_open() {
        let period = BillingPeriod::calendar_month(2024, 1).unwrap();
        assert!(period.contains_date(date(2024, 1, 1)));
        assert!(period.contains_date(date(2024, 1, 31)));
        assert!(!period.contains_date(date(2024, 2, 1)));
    }

    #[test]
    fn test_due_date_applies_payment_terms() {
        let period = BillingPeriod::calendar_month(2024, 1).unwrap();
        assert_eq!(period.due_date(30), date(2024, 3, 1));
        assert_eq!(period.due_date(0), date(2024, 1, 31));
    }
}

//! Reminder-window predicates for the daily notification jobs.
//!
//! The jobs are idempotent per day: each record carries the date its last
//! reminder went out, and a reminder is only sent when the window is open
//! and nothing was sent today. The guard is advanced only after a
//! confirmed delivery, so a failed send retries on the next daily run.

use chrono::{Days, Months, NaiveDate};

/// Default interval between farrier visits.
const FARRIER_INTERVAL_WEEKS: u64 = 6;

/// Next due date from a date given and an interval in months.
#[must_use]
pub fn next_due_from_interval(date_given: NaiveDate, interval_months: u32) -> NaiveDate {
    date_given
        .checked_add_months(Months::new(interval_months))
        .unwrap_or(date_given)
}

/// Default next-due date for a farrier visit (six weeks out).
#[must_use]
pub fn default_farrier_due(visit_date: NaiveDate) -> NaiveDate {
    visit_date
        .checked_add_days(Days::new(FARRIER_INTERVAL_WEEKS * 7))
        .unwrap_or(visit_date)
}

/// Returns true once a vaccination's reminder window has opened: the due
/// date is at most `reminder_days_before` away (or already past).
#[must_use]
pub fn vaccination_reminder_open(
    today: NaiveDate,
    next_due: NaiveDate,
    reminder_days_before: u16,
) -> bool {
    let window_opens = next_due
        .checked_sub_days(Days::new(u64::from(reminder_days_before)))
        .unwrap_or(next_due);
    today >= window_opens
}

/// Returns true when a farrier visit is due within the lookahead window,
/// excluding visits already overdue (those were flagged while upcoming).
#[must_use]
pub fn farrier_due_within(today: NaiveDate, next_due: NaiveDate, lookahead_days: u16) -> bool {
    let horizon = today
        .checked_add_days(Days::new(u64::from(lookahead_days)))
        .unwrap_or(today);
    next_due >= today && next_due <= horizon
}

/// The per-day idempotency guard: send only if nothing was sent today.
#[must_use]
pub fn should_send_reminder(today: NaiveDate, last_sent: Option<NaiveDate>) -> bool {
    last_sent != Some(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_due_from_interval() {
        assert_eq!(
            next_due_from_interval(date(2024, 1, 15), 12),
            date(2025, 1, 15)
        );
        assert_eq!(
            next_due_from_interval(date(2024, 1, 31), 1),
            date(2024, 2, 29),
            "clamps to the end of shorter months"
        );
    }

    #[test]
    fn test_default_farrier_due_is_six_weeks() {
        assert_eq!(default_farrier_due(date(2024, 1, 1)), date(2024, 2, 12));
    }

    #[test]
    fn test_vaccination_window_opens_at_threshold() {
        let due = date(2024, 3, 1);
        assert!(!vaccination_reminder_open(date(2024, 1, 30), due, 30));
        assert!(vaccination_reminder_open(date(2024, 1, 31), due, 30));
        assert!(vaccination_reminder_open(date(2024, 3, 15), due, 30), "overdue still reminds");
    }

    #[test]
    fn test_farrier_window_is_bounded_both_ends() {
        let today = date(2024, 1, 10);
        assert!(farrier_due_within(today, date(2024, 1, 10), 14));
        assert!(farrier_due_within(today, date(2024, 1, 24), 14));
        assert!(!farrier_due_within(today, date(2024, 1, 25), 14));
        assert!(!farrier_due_within(today, date(2024, 1, 9), 14));
    }

    #[test]
    fn test_guard_blocks_second_send_same_day() {
        let today = date(2024, 1, 10);
        assert!(should_send_reminder(today, None));
        assert!(should_send_reminder(today, Some(date(2024, 1, 9))));
        assert!(!should_send_reminder(today, Some(today)));
    }
}

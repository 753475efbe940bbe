//! Date-overlap and proration logic.
//!
//! This is the reusable algorithmic core of billing: given a placement's
//! date range and a billing period, how many days are chargeable and what
//! do they cost. Pure functions, unit-testable without persistence.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::period::BillingPeriod;

/// Computes the overlap between a half-open span `[start, end)` and a
/// billing period. An open span (`end = None`) runs through the period's
/// end. Returns `None` when the overlap is empty.
#[must_use]
pub fn range_overlap(
    start: NaiveDate,
    end: Option<NaiveDate>,
    period: &BillingPeriod,
) -> Option<(NaiveDate, NaiveDate)> {
    let effective_start = start.max(period.start);
    let effective_end = end.map_or(period.end, |e| e.min(period.end));

    (effective_start < effective_end).then_some((effective_start, effective_end))
}

/// Number of chargeable days a span contributes to a period.
#[must_use]
pub fn chargeable_days(start: NaiveDate, end: Option<NaiveDate>, period: &BillingPeriod) -> i64 {
    range_overlap(start, end, period).map_or(0, |(s, e)| (e - s).num_days())
}

/// Charge for a daily-rated span within a period: chargeable days times
/// the daily rate, exact decimal arithmetic.
#[must_use]
pub fn livery_charge(
    start: NaiveDate,
    end: Option<NaiveDate>,
    period: &BillingPeriod,
    daily_rate: Decimal,
) -> Decimal {
    Decimal::from(chargeable_days(start, end, period)) * daily_rate
}

/// Returns true if two half-open spans for the same horse overlap.
/// Open spans extend indefinitely.
#[must_use]
pub fn spans_overlap(
    a_start: NaiveDate,
    a_end: Option<NaiveDate>,
    b_start: NaiveDate,
    b_end: Option<NaiveDate>,
) -> bool {
    let a_before_b = a_end.is_some_and(|e| e <= b_start);
    let b_before_a = b_end.is_some_and(|e| e <= a_start);
    !(a_before_b || b_before_a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn january() -> BillingPeriod {
        BillingPeriod::calendar_month(2024, 1).unwrap()
    }

    #[test]
    fn test_open_span_charged_through_period_end() {
        // Open-ended placement billed for [2024-01-01, 2024-02-01) at £5.00/day.
        let days = chargeable_days(date(2023, 11, 12), None, &january());
        assert_eq!(days, 31);
        let charge = livery_charge(date(2023, 11, 12), None, &january(), dec!(5.00));
        assert_eq!(charge, dec!(155.00));
    }

    #[test]
    fn test_span_fully_inside_period() {
        // [2024-01-10, 2024-01-20) at £24.00/day -> 10 days, £240.00.
        let start = date(2024, 1, 10);
        let end = Some(date(2024, 1, 20));
        assert_eq!(chargeable_days(start, end, &january()), 10);
        assert_eq!(
            livery_charge(start, end, &january(), dec!(24.00)),
            dec!(240.00)
        );
    }

    #[test]
    fn test_span_starting_mid_period() {
        let days = chargeable_days(date(2024, 1, 15), None, &january());
        assert_eq!(days, 17);
    }

    #[test]
    fn test_span_ending_mid_period() {
        let days = chargeable_days(date(2023, 12, 1), Some(date(2024, 1, 11)), &january());
        assert_eq!(days, 10);
    }

    #[test]
    fn test_span_outside_period_charges_nothing() {
        assert_eq!(
            chargeable_days(date(2024, 2, 1), None, &january()),
            0,
            "span starting on the exclusive end bound is not chargeable"
        );
        assert_eq!(
            chargeable_days(date(2023, 11, 1), Some(date(2024, 1, 1)), &january()),
            0
        );
        assert_eq!(
            livery_charge(date(2024, 3, 1), None, &january(), dec!(100)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_spans_overlap_shared_days() {
        // [Jan 1, Jan 15) and [Jan 10, Jan 20) share days.
        assert!(spans_overlap(
            date(2024, 1, 1),
            Some(date(2024, 1, 15)),
            date(2024, 1, 10),
            Some(date(2024, 1, 20)),
        ));
    }

    #[test]
    fn test_adjacent_spans_do_not_overlap() {
        // [Jan 1, Jan 15) and [Jan 15, Jan 20) are back-to-back.
        assert!(!spans_overlap(
            date(2024, 1, 1),
            Some(date(2024, 1, 15)),
            date(2024, 1, 15),
            Some(date(2024, 1, 20)),
        ));
    }

    #[test]
    fn test_open_span_overlaps_any_later_span() {
        assert!(spans_overlap(
            date(2024, 1, 1),
            None,
            date(2025, 6, 1),
            Some(date(2025, 7, 1)),
        ));
        assert!(spans_overlap(date(2024, 1, 1), None, date(2024, 6, 1), None));
    }

    #[test]
    fn test_closed_span_before_open_span_does_not_overlap() {
        assert!(!spans_overlap(
            date(2023, 1, 1),
            Some(date(2023, 6, 1)),
            date(2023, 6, 1),
            None,
        ));
    }
}

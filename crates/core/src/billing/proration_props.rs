//! Property-based tests for the date-overlap and proration core.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::period::BillingPeriod;
use super::proration::{chargeable_days, livery_charge, range_overlap, spans_overlap};

/// Strategy to generate dates from 2020-01-01 to 2030-12-28.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..=2030, 1u32..=12, 1u32..=28)
        .prop_map(|(year, month, day)| NaiveDate::from_ymd_opt(year, month, day).unwrap())
}

/// Strategy to generate a valid half-open span (start < end).
fn span_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    date_strategy().prop_flat_map(|start| {
        (Just(start), 1i64..=400).prop_map(move |(s, days)| (s, s + chrono::Duration::days(days)))
    })
}

/// Strategy to generate a billing period up to ~3 months long.
fn period_strategy() -> impl Strategy<Value = BillingPeriod> {
    date_strategy().prop_flat_map(|start| {
        (Just(start), 1i64..=92).prop_map(move |(s, days)| {
            BillingPeriod::new(s, s + chrono::Duration::days(days)).unwrap()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The overlap of a span with a period never exceeds either input,
    /// and the chargeable day count matches the returned bounds exactly.
    #[test]
    fn prop_overlap_is_bounded(
        (start, end) in span_strategy(),
        period in period_strategy(),
    ) {
        if let Some((s, e)) = range_overlap(start, Some(end), &period) {
            prop_assert!(s >= start && s >= period.start);
            prop_assert!(e <= end && e <= period.end);
            prop_assert!(s < e);
            prop_assert_eq!(chargeable_days(start, Some(end), &period), (e - s).num_days());
        } else {
            prop_assert_eq!(chargeable_days(start, Some(end), &period), 0);
        }
    }

    /// An open span always fills the remainder of the period after its start.
    #[test]
    fn prop_open_span_fills_period_tail(
        start in date_strategy(),
        period in period_strategy(),
    ) {
        let days = chargeable_days(start, None, &period);
        let expected = (period.end - start.max(period.start)).num_days().max(0);
        prop_assert_eq!(days, expected);
    }

    /// A charge is exactly days x rate in decimal arithmetic: the sum of
    /// per-day charges equals the span charge with no rounding drift.
    #[test]
    fn prop_charge_is_exact_multiple(
        (start, end) in span_strategy(),
        period in period_strategy(),
        pence in 1u32..=20_000,
    ) {
        let rate = Decimal::new(i64::from(pence), 2);
        let days = chargeable_days(start, Some(end), &period);
        let charge = livery_charge(start, Some(end), &period, rate);

        let mut summed = Decimal::ZERO;
        for _ in 0..days {
            summed += rate;
        }
        prop_assert_eq!(charge, summed);
    }

    /// Splitting a span at any interior date never changes the total charge.
    #[test]
    fn prop_split_spans_never_double_charge(
        (start, end) in span_strategy(),
        period in period_strategy(),
        split_offset in 1i64..=399,
        pence in 1u32..=20_000,
    ) {
        let split = start + chrono::Duration::days(split_offset);
        prop_assume!(split > start && split < end);

        let rate = Decimal::new(i64::from(pence), 2);
        let whole = livery_charge(start, Some(end), &period, rate);
        let first = livery_charge(start, Some(split), &period, rate);
        let second = livery_charge(split, Some(end), &period, rate);

        prop_assert_eq!(whole, first + second);
    }

    /// Span overlap detection is symmetric.
    #[test]
    fn prop_span_overlap_is_symmetric(
        (a_start, a_end) in span_strategy(),
        (b_start, b_end) in span_strategy(),
    ) {
        let ab = spans_overlap(a_start, Some(a_end), b_start, Some(b_end));
        let ba = spans_overlap(b_start, Some(b_end), a_start, Some(a_end));
        prop_assert_eq!(ab, ba);
    }

    /// Two spans overlap exactly when both are chargeable for some shared day.
    #[test]
    fn prop_overlap_agrees_with_shared_day(
        (a_start, a_end) in span_strategy(),
        (b_start, b_end) in span_strategy(),
    ) {
        let overlap = spans_overlap(a_start, Some(a_end), b_start, Some(b_end));
        let shared_start = a_start.max(b_start);
        let shared_end = a_end.min(b_end);
        prop_assert_eq!(overlap, shared_start < shared_end);
    }
}

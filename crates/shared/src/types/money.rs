//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts in the system are `rust_decimal::Decimal`; these helpers
//! cover the rounding and display conventions for a sterling-billing yard.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to whole pence (two decimal places, banker's rounding).
#[must_use]
pub fn to_pence(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Formats an amount as sterling, e.g. `£155.00`.
#[must_use]
pub fn format_gbp(amount: Decimal) -> String {
    format!("\u{a3}{:.2}", to_pence(amount))
}

/// Formats a rate for line-item descriptions, trimming trailing zeros,
/// e.g. `£5` or `£7.50`.
#[must_use]
pub fn format_rate(rate: Decimal) -> String {
    format!("\u{a3}{}", rate.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_pence_rounds_half_even() {
        assert_eq!(to_pence(dec!(1.005)), dec!(1.00));
        assert_eq!(to_pence(dec!(1.015)), dec!(1.02));
        assert_eq!(to_pence(dec!(1.2)), dec!(1.20));
    }

    #[test]
    fn test_format_gbp() {
        assert_eq!(format_gbp(dec!(155)), "\u{a3}155.00");
        assert_eq!(format_gbp(dec!(7.5)), "\u{a3}7.50");
    }

    #[test]
    fn test_format_rate_trims_trailing_zeros() {
        assert_eq!(format_rate(dec!(5.00)), "\u{a3}5");
        assert_eq!(format_rate(dec!(7.50)), "\u{a3}7.5");
        assert_eq!(format_rate(dec!(24)), "\u{a3}24");
    }
}

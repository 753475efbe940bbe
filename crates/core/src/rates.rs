//! Livery rate catalog types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use paddock_shared::types::RateTypeId;

/// How a rate type is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBasis {
    /// Charged per chargeable day within the billing period.
    PerDay,
    /// Charged as a flat amount for any placement overlapping the period.
    PerMonth,
}

/// A rate catalog entry resolved for billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// Identifier of the rate type this rate belongs to.
    pub rate_type_id: RateTypeId,
    /// Display name, e.g. "Stabled" or "Grass Livery".
    pub name: String,
    /// Charging basis.
    pub basis: RateBasis,
    /// The per-day or per-month amount.
    pub amount: Decimal,
}

impl Rate {
    /// Returns true for per-day rates.
    #[must_use]
    pub fn is_daily(&self) -> bool {
        self.basis == RateBasis::PerDay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_basis_check() {
        let daily = Rate {
            rate_type_id: RateTypeId::new(),
            name: "Stabled".to_string(),
            basis: RateBasis::PerDay,
            amount: dec!(24.00),
        };
        assert!(daily.is_daily());

        let monthly = Rate {
            basis: RateBasis::PerMonth,
            ..daily
        };
        assert!(!monthly.is_daily());
    }
}

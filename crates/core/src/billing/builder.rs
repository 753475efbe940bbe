//! The invoice builder.
//!
//! Pure calculation: given an owner's placement segments and unbilled extra
//! charges for a billing period, plus a rate-catalog lookup, produce the
//! ordered line items and exact decimal total for a draft invoice. No
//! persistence here; the repository layer feeds this and stores the result
//! in one transaction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use paddock_shared::types::{
    ExtraChargeId, HorseId, OwnerId, PlacementId, RateTypeId, money::format_rate,
};

use super::error::InvoiceError;
use super::period::BillingPeriod;
use super::proration::{chargeable_days, range_overlap, spans_overlap};
use crate::rates::{Rate, RateBasis};

/// Classification of an invoice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    /// Livery charge derived from a placement segment.
    Livery,
    /// Veterinary extra charge.
    Vet,
    /// Farrier extra charge.
    Farrier,
    /// Vaccination extra charge.
    Vaccination,
    /// Feed or hay extra charge.
    Feed,
    /// Anything else.
    Other,
}

impl LineType {
    /// String form matching the database enum.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Livery => "livery",
            Self::Vet => "vet",
            Self::Farrier => "farrier",
            Self::Vaccination => "vaccination",
            Self::Feed => "feed",
            Self::Other => "other",
        }
    }

    /// Human label used in line-item descriptions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Livery => "Livery",
            Self::Vet => "Veterinary",
            Self::Farrier => "Farrier",
            Self::Vaccination => "Vaccination",
            Self::Feed => "Feed/Hay",
            Self::Other => "Other",
        }
    }
}

/// A placement segment belonging to the billed owner, already clipped to
/// the owner's tenure of the horse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementSegment {
    /// The placement this segment came from.
    pub placement_id: PlacementId,
    /// The horse being kept.
    pub horse_id: HorseId,
    /// Horse name, used for description and ordering.
    pub horse_name: String,
    /// Rate type the placement is charged under.
    pub rate_type_id: RateTypeId,
    /// Segment start (inclusive).
    pub start: NaiveDate,
    /// Segment end (exclusive); `None` while the horse is still placed.
    pub end: Option<NaiveDate>,
}

/// An unbilled extra charge payable by the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraChargeInput {
    /// The charge record.
    pub charge_id: ExtraChargeId,
    /// The horse the charge relates to.
    pub horse_id: HorseId,
    /// Horse name, used for description and ordering.
    pub horse_name: String,
    /// Charge classification.
    pub line_type: LineType,
    /// Date the charge was incurred.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: String,
    /// Fixed amount.
    pub amount: Decimal,
}

/// One priced line on a built invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Horse the line relates to; cleared if the horse is later deleted.
    pub horse_id: Option<HorseId>,
    /// Source placement for livery lines.
    pub placement_id: Option<PlacementId>,
    /// Source extra charge for non-livery lines.
    pub charge_id: Option<ExtraChargeId>,
    /// Line classification.
    pub line_type: LineType,
    /// Description shown on the invoice.
    pub description: String,
    /// Day count for livery lines, 1 for extras.
    pub quantity: Decimal,
    /// Daily/monthly rate or the fixed charge amount.
    pub unit_price: Decimal,
    /// Exact line total.
    pub line_total: Decimal,
}

/// The result of building an invoice: ordered line items and exact totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltInvoice {
    /// The billed owner.
    pub owner_id: OwnerId,
    /// The billing period.
    pub period: BillingPeriod,
    /// Line items ordered by horse, then date.
    pub line_items: Vec<LineItem>,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Invoice total; equals the subtotal (no tax).
    pub total: Decimal,
}

/// Builds draft invoices from placement and charge data.
///
/// Stateless: catalog access is injected as a lookup closure so the
/// calculation stays independent of persistence.
pub struct InvoiceBuilder;

impl InvoiceBuilder {
    /// Builds the invoice for one owner and period.
    ///
    /// Line-item ordering is deterministic: by horse name, then by date
    /// within the period, livery before extras on the same day.
    ///
    /// # Errors
    ///
    /// - `OverlappingPlacements` if two segments for the same horse share
    ///   chargeable days (double billing is never resolved silently)
    /// - `MissingRate` if a chargeable segment's rate type is not in the
    ///   catalog
    /// - `NegativeAmount` if an extra charge has a negative amount
    /// - `NothingToBill` if no segment and no charge produces a line
    pub fn build<R>(
        owner_id: OwnerId,
        period: BillingPeriod,
        segments: &[PlacementSegment],
        extras: &[ExtraChargeInput],
        rate_lookup: R,
    ) -> Result<BuiltInvoice, InvoiceError>
    where
        R: Fn(RateTypeId) -> Option<Rate>,
    {
        Self::reject_overlapping_segments(segments)?;

        // Sortable intermediate: (horse name, date within period, extras last).
        let mut keyed: Vec<(String, NaiveDate, u8, LineItem)> = Vec::new();

        for segment in segments {
            let Some((eff_start, eff_end)) = range_overlap(segment.start, segment.end, &period)
            else {
                continue;
            };

            let rate = rate_lookup(segment.rate_type_id)
                .ok_or(InvoiceError::MissingRate(segment.rate_type_id))?;

            let item = match rate.basis {
                RateBasis::PerDay => {
                    let days = chargeable_days(segment.start, segment.end, &period);
                    LineItem {
                        horse_id: Some(segment.horse_id),
                        placement_id: Some(segment.placement_id),
                        charge_id: None,
                        line_type: LineType::Livery,
                        description: daily_description(&rate, days, eff_start, eff_end),
                        quantity: Decimal::from(days),
                        unit_price: rate.amount,
                        line_total: Decimal::from(days) * rate.amount,
                    }
                }
                RateBasis::PerMonth => LineItem {
                    horse_id: Some(segment.horse_id),
                    placement_id: Some(segment.placement_id),
                    charge_id: None,
                    line_type: LineType::Livery,
                    description: monthly_description(&rate, &period),
                    quantity: Decimal::ONE,
                    unit_price: rate.amount,
                    line_total: rate.amount,
                },
            };

            keyed.push((segment.horse_name.clone(), eff_start, 0, item));
        }

        for extra in extras {
            if !period.contains_date(extra.date) {
                continue;
            }
            if extra.amount.is_sign_negative() {
                return Err(InvoiceError::NegativeAmount);
            }

            let item = LineItem {
                horse_id: Some(extra.horse_id),
                placement_id: None,
                charge_id: Some(extra.charge_id),
                line_type: extra.line_type,
                description: format!("{} - {}", extra.line_type.label(), extra.description),
                quantity: Decimal::ONE,
                unit_price: extra.amount,
                line_total: extra.amount,
            };

            keyed.push((extra.horse_name.clone(), extra.date, 1, item));
        }

        if keyed.is_empty() {
            return Err(InvoiceError::NothingToBill(owner_id));
        }

        keyed.sort_by(|a, b| {
            (a.0.as_str(), a.1, a.2, a.3.description.as_str())
                .cmp(&(b.0.as_str(), b.1, b.2, b.3.description.as_str()))
        });

        let line_items: Vec<LineItem> = keyed.into_iter().map(|(_, _, _, item)| item).collect();
        let subtotal: Decimal = line_items.iter().map(|item| item.line_total).sum();

        Ok(BuiltInvoice {
            owner_id,
            period,
            line_items,
            subtotal,
            total: subtotal,
        })
    }

    /// Rejects segment sets where the same horse is charged twice for a day.
    fn reject_overlapping_segments(segments: &[PlacementSegment]) -> Result<(), InvoiceError> {
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if a.horse_id == b.horse_id
                    && spans_overlap(a.start, a.end, b.start, b.end)
                {
                    let (first, second) = if a.start <= b.start { (a, b) } else { (b, a) };
                    return Err(InvoiceError::OverlappingPlacements {
                        horse_id: a.horse_id,
                        first_start: first.start,
                        second_start: second.start,
                    });
                }
            }
        }
        Ok(())
    }
}

/// e.g. "Stabled £24 per day - 10 days (10 Jan to 19 Jan 2024)".
fn daily_description(rate: &Rate, days: i64, eff_start: NaiveDate, eff_end: NaiveDate) -> String {
    let last_day = eff_end.pred_opt().unwrap_or(eff_start);
    format!(
        "{} {} per day - {} days ({} to {})",
        rate.name,
        format_rate(rate.amount),
        days,
        eff_start.format("%-d %b"),
        last_day.format("%-d %b %Y"),
    )
}

/// e.g. "Retirement Field £200 per month (January 2024)".
fn monthly_description(rate: &Rate, period: &BillingPeriod) -> String {
    format!(
        "{} {} per month ({})",
        rate.name,
        format_rate(rate.amount),
        period.name(),
    )
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

    fn stabled_rate_id() -> RateTypeId {
        RateTypeId::from_uuid(uuid::Uuid::from_u128(1))
    }

    fn grass_rate_id() -> RateTypeId {
        RateTypeId::from_uuid(uuid::Uuid::from_u128(2))
    }

    fn catalog(rate_type_id: RateTypeId) -> Option<Rate> {
        if rate_type_id == stabled_rate_id() {
            Some(Rate {
                rate_type_id,
                name: "Stabled".to_string(),
                basis: RateBasis::PerDay,
                amount: dec!(24.00),
            })
        } else if rate_type_id == grass_rate_id() {
            Some(Rate {
                rate_type_id,
                name: "Grass Livery".to_string(),
                basis: RateBasis::PerMonth,
                amount: dec!(200.00),
            })
        } else {
            None
        }
    }

    fn segment(
        horse_id: HorseId,
        horse_name: &str,
        rate_type_id: RateTypeId,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> PlacementSegment {
        PlacementSegment {
            placement_id: PlacementId::new(),
            horse_id,
            horse_name: horse_name.to_string(),
            rate_type_id,
            start,
            end,
        }
    }

    #[test]
    fn test_open_placement_full_month_at_daily_rate() {
        // 31 days of January at £5.00/day = £155.00.
        let horse = HorseId::new();
        let fiver = RateTypeId::new();
        let lookup = move |id: RateTypeId| {
            (id == fiver).then(|| Rate {
                rate_type_id: id,
                name: "Field".to_string(),
                basis: RateBasis::PerDay,
                amount: dec!(5.00),
            })
        };

        let built = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[segment(horse, "Bramble", fiver, date(2023, 10, 1), None)],
            &[],
            lookup,
        )
        .unwrap();

        assert_eq!(built.line_items.len(), 1);
        assert_eq!(built.line_items[0].quantity, dec!(31));
        assert_eq!(built.line_items[0].unit_price, dec!(5.00));
        assert_eq!(built.line_items[0].line_total, dec!(155.00));
        assert_eq!(built.total, dec!(155.00));
    }

    #[test]
    fn test_placement_inside_period_charges_exact_days() {
        // [2024-01-10, 2024-01-20) at £24.00/day = 10 x £24.00 = £240.00.
        let built = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[segment(
                HorseId::new(),
                "Copper",
                stabled_rate_id(),
                date(2024, 1, 10),
                Some(date(2024, 1, 20)),
            )],
            &[],
            catalog,
        )
        .unwrap();

        assert_eq!(built.line_items[0].quantity, dec!(10));
        assert_eq!(built.total, dec!(240.00));
        assert_eq!(
            built.line_items[0].description,
            "Stabled \u{a3}24 per day - 10 days (10 Jan to 19 Jan 2024)"
        );
    }

    #[test]
    fn test_total_equals_sum_of_line_totals() {
        let horse_a = HorseId::new();
        let horse_b = HorseId::new();
        let built = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[
                segment(horse_a, "Bramble", stabled_rate_id(), date(2024, 1, 1), None),
                segment(horse_b, "Copper", grass_rate_id(), date(2023, 5, 1), None),
            ],
            &[ExtraChargeInput {
                charge_id: ExtraChargeId::new(),
                horse_id: horse_a,
                horse_name: "Bramble".to_string(),
                line_type: LineType::Farrier,
                date: date(2024, 1, 12),
                description: "Full set".to_string(),
                amount: dec!(85.50),
            }],
            catalog,
        )
        .unwrap();

        let summed: Decimal = built.line_items.iter().map(|i| i.line_total).sum();
        assert_eq!(built.total, summed);
        assert_eq!(built.subtotal, summed);
        assert_eq!(built.total, dec!(744.00) + dec!(200.00) + dec!(85.50));
    }

    #[test]
    fn test_mid_period_move_produces_two_segments_no_double_charge() {
        // Horse moves location on 16 Jan: [1 Jan, 16 Jan) + [16 Jan, open).
        let horse = HorseId::new();
        let built = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[
                segment(
                    horse,
                    "Bramble",
                    stabled_rate_id(),
                    date(2024, 1, 1),
                    Some(date(2024, 1, 16)),
                ),
                segment(horse, "Bramble", stabled_rate_id(), date(2024, 1, 16), None),
            ],
            &[],
            catalog,
        )
        .unwrap();

        assert_eq!(built.line_items.len(), 2);
        assert_eq!(built.line_items[0].quantity, dec!(15));
        assert_eq!(built.line_items[1].quantity, dec!(16));
        // 31 days total, no shared day charged twice.
        assert_eq!(built.total, dec!(31) * dec!(24.00));
    }

    #[test]
    fn test_overlapping_segments_rejected_not_resolved() {
        let horse = HorseId::new();
        let err = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[
                segment(
                    horse,
                    "Bramble",
                    stabled_rate_id(),
                    date(2024, 1, 1),
                    Some(date(2024, 1, 16)),
                ),
                segment(horse, "Bramble", stabled_rate_id(), date(2024, 1, 10), None),
            ],
            &[],
            catalog,
        )
        .unwrap_err();

        assert!(matches!(err, InvoiceError::OverlappingPlacements { .. }));
    }

    #[test]
    fn test_same_dates_different_horses_are_fine() {
        let built = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[
                segment(HorseId::new(), "Bramble", stabled_rate_id(), date(2024, 1, 1), None),
                segment(HorseId::new(), "Copper", stabled_rate_id(), date(2024, 1, 1), None),
            ],
            &[],
            catalog,
        )
        .unwrap();
        assert_eq!(built.line_items.len(), 2);
    }

    #[test]
    fn test_missing_rate_fails() {
        let unknown = RateTypeId::new();
        let err = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[segment(HorseId::new(), "Bramble", unknown, date(2024, 1, 1), None)],
            &[],
            catalog,
        )
        .unwrap_err();

        assert!(matches!(err, InvoiceError::MissingRate(id) if id == unknown));
    }

    #[test]
    fn test_unchargeable_rate_type_is_never_looked_up() {
        // Placement entirely outside the period: its (unconfigured) rate
        // must not fail the build.
        let built = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[
                segment(HorseId::new(), "Bramble", stabled_rate_id(), date(2024, 1, 1), None),
                segment(
                    HorseId::new(),
                    "Old Boy",
                    RateTypeId::new(),
                    date(2022, 1, 1),
                    Some(date(2022, 6, 1)),
                ),
            ],
            &[],
            catalog,
        )
        .unwrap();
        assert_eq!(built.line_items.len(), 1);
    }

    #[test]
    fn test_nothing_to_bill_fails() {
        let owner = OwnerId::new();
        let err = InvoiceBuilder::build(owner, january(), &[], &[], catalog).unwrap_err();
        assert!(matches!(err, InvoiceError::NothingToBill(id) if id == owner));
    }

    #[test]
    fn test_extra_charge_outside_period_is_skipped() {
        let horse = HorseId::new();
        let err = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[],
            &[ExtraChargeInput {
                charge_id: ExtraChargeId::new(),
                horse_id: horse,
                horse_name: "Bramble".to_string(),
                line_type: LineType::Vet,
                date: date(2024, 2, 3),
                description: "Teeth rasped".to_string(),
                amount: dec!(60.00),
            }],
            catalog,
        )
        .unwrap_err();

        assert!(matches!(err, InvoiceError::NothingToBill(_)));
    }

    #[test]
    fn test_negative_extra_charge_rejected() {
        let err = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[],
            &[ExtraChargeInput {
                charge_id: ExtraChargeId::new(),
                horse_id: HorseId::new(),
                horse_name: "Bramble".to_string(),
                line_type: LineType::Other,
                date: date(2024, 1, 3),
                description: "Refund".to_string(),
                amount: dec!(-10.00),
            }],
            catalog,
        )
        .unwrap_err();

        assert!(matches!(err, InvoiceError::NegativeAmount));
    }

    #[test]
    fn test_line_items_ordered_by_horse_then_date() {
        let apollo = HorseId::new();
        let zephyr = HorseId::new();
        let built = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[
                segment(zephyr, "Zephyr", stabled_rate_id(), date(2024, 1, 5), None),
                segment(
                    apollo,
                    "Apollo",
                    stabled_rate_id(),
                    date(2024, 1, 10),
                    Some(date(2024, 1, 20)),
                ),
            ],
            &[
                ExtraChargeInput {
                    charge_id: ExtraChargeId::new(),
                    horse_id: apollo,
                    horse_name: "Apollo".to_string(),
                    line_type: LineType::Vet,
                    date: date(2024, 1, 2),
                    description: "Vaccination visit".to_string(),
                    amount: dec!(45.00),
                },
                ExtraChargeInput {
                    charge_id: ExtraChargeId::new(),
                    horse_id: zephyr,
                    horse_name: "Zephyr".to_string(),
                    line_type: LineType::Feed,
                    date: date(2024, 1, 28),
                    description: "Haylage".to_string(),
                    amount: dec!(32.00),
                },
            ],
            catalog,
        )
        .unwrap();

        let kinds: Vec<(LineType, Option<HorseId>)> = built
            .line_items
            .iter()
            .map(|i| (i.line_type, i.horse_id))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (LineType::Vet, Some(apollo)),     // Apollo, 2 Jan
                (LineType::Livery, Some(apollo)),  // Apollo, 10 Jan
                (LineType::Livery, Some(zephyr)),  // Zephyr, 5 Jan
                (LineType::Feed, Some(zephyr)),    // Zephyr, 28 Jan
            ]
        );
    }

    #[test]
    fn test_monthly_rate_charged_flat() {
        let built = InvoiceBuilder::build(
            OwnerId::new(),
            january(),
            &[segment(
                HorseId::new(),
                "Old Boy",
                grass_rate_id(),
                date(2024, 1, 20),
                None,
            )],
            &[],
            catalog,
        )
        .unwrap();

        assert_eq!(built.line_items[0].quantity, Decimal::ONE);
        assert_eq!(built.total, dec!(200.00));
        assert_eq!(
            built.line_items[0].description,
            "Grass Livery \u{a3}200 per month (January 2024)"
        );
    }
}

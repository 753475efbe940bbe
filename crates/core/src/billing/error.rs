//! Invoice error types for validation and state errors.

use chrono::NaiveDate;
use thiserror::Error;
use paddock_shared::types::{HorseId, OwnerId, RateTypeId};

use super::lifecycle::InvoiceStatus;

/// Errors that can occur while building or transitioning an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    // ========== Validation Errors ==========
    /// Billing period end must be after its start.
    #[error("Billing period end {end} must be after start {start}")]
    EmptyPeriod {
        /// Period start.
        start: NaiveDate,
        /// Period end (exclusive).
        end: NaiveDate,
    },

    /// Owner has nothing to bill in the period.
    #[error("Nothing to bill for owner {0} in this period")]
    NothingToBill(OwnerId),

    /// A placement's rate type is not configured in the rate catalog.
    #[error("Rate type {0} is not configured in the rate catalog")]
    MissingRate(RateTypeId),

    /// Two placement segments for the same horse share chargeable days.
    #[error("Horse {horse_id} has overlapping placements from {first_start} and {second_start}")]
    OverlappingPlacements {
        /// The horse with conflicting placements.
        horse_id: HorseId,
        /// Start of the earlier conflicting segment.
        first_start: NaiveDate,
        /// Start of the later conflicting segment.
        second_start: NaiveDate,
    },

    /// A line item amount came out negative.
    #[error("Line item amount cannot be negative")]
    NegativeAmount,

    // ========== Conflict Errors ==========
    /// The owner already has an invoice covering this period.
    #[error("Owner {owner_id} already has invoice {invoice_number} overlapping this period")]
    DuplicateInvoice {
        /// The owner being billed.
        owner_id: OwnerId,
        /// The number of the existing invoice.
        invoice_number: String,
    },

    // ========== State Errors ==========
    /// Illegal lifecycle transition.
    #[error("Invalid invoice status transition from {from:?} to {to:?}")]
    InvalidStatusTransition {
        /// Current status.
        from: InvoiceStatus,
        /// Target status.
        to: InvoiceStatus,
    },

    /// Only draft invoices can be deleted.
    #[error("Only draft invoices can be deleted")]
    CanOnlyDeleteDraft,
}

impl InvoiceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPeriod { .. } => "EMPTY_PERIOD",
            Self::NothingToBill(_) => "NOTHING_TO_BILL",
            Self::MissingRate(_) => "MISSING_RATE",
            Self::OverlappingPlacements { .. } => "OVERLAPPING_PLACEMENTS",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::DuplicateInvoice { .. } => "DUPLICATE_INVOICE",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::CanOnlyDeleteDraft => "CAN_ONLY_DELETE_DRAFT",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Conflicts (already billed) are deliberately distinct from
    /// validation errors so callers can tell them apart.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::EmptyPeriod { .. }
            | Self::NothingToBill(_)
            | Self::MissingRate(_)
            | Self::OverlappingPlacements { .. }
            | Self::NegativeAmount => 400,

            Self::DuplicateInvoice { .. } => 409,

            Self::InvalidStatusTransition { .. } | Self::CanOnlyDeleteDraft => 422,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            InvoiceError::NothingToBill(OwnerId::new()).error_code(),
            "NOTHING_TO_BILL"
        );
        assert_eq!(
            InvoiceError::MissingRate(RateTypeId::new()).error_code(),
            "MISSING_RATE"
        );
        assert_eq!(
            InvoiceError::DuplicateInvoice {
                owner_id: OwnerId::new(),
                invoice_number: "INV00001".to_string(),
            }
            .error_code(),
            "DUPLICATE_INVOICE"
        );
    }

    #[test]
    fn test_conflict_is_distinct_from_validation() {
        let conflict = InvoiceError::DuplicateInvoice {
            owner_id: OwnerId::new(),
            invoice_number: "INV00002".to_string(),
        };
        assert_eq!(conflict.http_status_code(), 409);

        let validation = InvoiceError::NothingToBill(OwnerId::new());
        assert_eq!(validation.http_status_code(), 400);
    }

    #[test]
    fn test_transition_errors_are_unprocessable() {
        let err = InvoiceError::InvalidStatusTransition {
            from: InvoiceStatus::Draft,
            to: InvoiceStatus::Paid,
        };
        assert_eq!(err.http_status_code(), 422);
        assert_eq!(InvoiceError::CanOnlyDeleteDraft.http_status_code(), 422);
    }

    #[test]
    fn test_error_display() {
        let err = InvoiceError::EmptyPeriod {
            start: date(2024, 2, 1),
            end: date(2024, 1, 1),
        };
        assert_eq!(
            err.to_string(),
            "Billing period end 2024-01-01 must be after start 2024-02-01"
        );
    }
}

//! Invoice lifecycle state machine.
//!
//! `draft -> sent -> paid`, or `draft -> sent -> overdue -> paid`.
//! Transitions are one-directional and may not skip `sent`; once an
//! invoice leaves draft its line items are frozen.

use serde::{Deserialize, Serialize};

use super::error::InvoiceError;

/// Invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Being prepared; line items may still be regenerated, may be deleted.
    Draft,
    /// Issued to the owner; contents frozen.
    Sent,
    /// Payment recorded.
    Paid,
    /// Past the due date with no payment recorded.
    Overdue,
}

impl InvoiceStatus {
    /// Returns true once line items are frozen (anything past draft).
    #[must_use]
    pub const fn is_frozen(self) -> bool {
        !matches!(self, Self::Draft)
    }

    /// String form matching the database enum.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

/// Validates an invoice status transition.
///
/// # Errors
///
/// Returns `InvoiceError::InvalidStatusTransition` for any move not in the
/// lifecycle table.
pub fn validate_status_transition(
    from: InvoiceStatus,
    to: InvoiceStatus,
) -> Result<(), InvoiceError> {
    use InvoiceStatus::{Draft, Overdue, Paid, Sent};

    let valid = matches!(
        (from, to),
        (Draft, Sent) | (Sent, Paid | Overdue) | (Overdue, Paid)
    );

    if valid {
        Ok(())
    } else {
        Err(InvoiceError::InvalidStatusTransition { from, to })
    }
}

/// Validates that an invoice can be deleted. Only drafts can.
///
/// # Errors
///
/// Returns `InvoiceError::CanOnlyDeleteDraft` otherwise.
pub fn validate_can_delete(status: InvoiceStatus) -> Result<(), InvoiceError> {
    if status == InvoiceStatus::Draft {
        Ok(())
    } else {
        Err(InvoiceError::CanOnlyDeleteDraft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InvoiceStatus::Draft, InvoiceStatus::Sent)]
    #[case(InvoiceStatus::Sent, InvoiceStatus::Paid)]
    #[case(InvoiceStatus::Sent, InvoiceStatus::Overdue)]
    #[case(InvoiceStatus::Overdue, InvoiceStatus::Paid)]
    fn test_valid_transitions(#[case] from: InvoiceStatus, #[case] to: InvoiceStatus) {
        assert!(validate_status_transition(from, to).is_ok());
    }

    #[rstest]
    #[case(InvoiceStatus::Draft, InvoiceStatus::Paid)] // cannot skip sent
    #[case(InvoiceStatus::Draft, InvoiceStatus::Overdue)]
    #[case(InvoiceStatus::Sent, InvoiceStatus::Draft)] // one-directional
    #[case(InvoiceStatus::Paid, InvoiceStatus::Sent)]
    #[case(InvoiceStatus::Paid, InvoiceStatus::Overdue)]
    #[case(InvoiceStatus::Overdue, InvoiceStatus::Sent)]
    #[case(InvoiceStatus::Overdue, InvoiceStatus::Draft)]
    #[case(InvoiceStatus::Draft, InvoiceStatus::Draft)]
    fn test_invalid_transitions(#[case] from: InvoiceStatus, #[case] to: InvoiceStatus) {
        assert!(matches!(
            validate_status_transition(from, to),
            Err(InvoiceError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_marking_draft_paid_directly_fails() {
        let err = validate_status_transition(InvoiceStatus::Draft, InvoiceStatus::Paid).unwrap_err();
        assert!(matches!(
            err,
            InvoiceError::InvalidStatusTransition {
                from: InvoiceStatus::Draft,
                to: InvoiceStatus::Paid,
            }
        ));
    }

    #[test]
    fn test_only_drafts_are_deletable() {
        assert!(validate_can_delete(InvoiceStatus::Draft).is_ok());
        for status in [
            InvoiceStatus::Sent,
            InvoiceStatus::Paid,
            InvoiceStatus::Overdue,
        ] {
            assert!(matches!(
                validate_can_delete(status),
                Err(InvoiceError::CanOnlyDeleteDraft)
            ));
        }
    }

    #[test]
    fn test_frozen_statuses() {
        assert!(!InvoiceStatus::Draft.is_frozen());
        assert!(InvoiceStatus::Sent.is_frozen());
        assert!(InvoiceStatus::Paid.is_frozen());
        assert!(InvoiceStatus::Overdue.is_frozen());
    }
}

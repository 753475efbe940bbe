//! Placement date-window validation.

use chrono::NaiveDate;
use thiserror::Error;
use paddock_shared::types::{HorseId, PlacementId};

use crate::billing::proration::spans_overlap;

/// Errors raised when recording a placement or ownership window.
#[derive(Debug, Error)]
pub enum PlacementError {
    /// The window ends on or before the day it starts.
    #[error("End date {end} must be after start date {start}")]
    EndBeforeStart {
        /// Window start.
        start: NaiveDate,
        /// Window end (exclusive).
        end: NaiveDate,
    },

    /// The new window shares days with an existing one for the same horse.
    #[error("Horse {horse_id} already has a window from {existing_start} to {existing_end} that overlaps these dates")]
    Overlapping {
        /// The horse.
        horse_id: HorseId,
        /// Start of the conflicting window.
        existing_start: NaiveDate,
        /// End of the conflicting window, or "present" when open.
        existing_end: String,
    },
}

impl PlacementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EndBeforeStart { .. } => "END_BEFORE_START",
            Self::Overlapping { .. } => "OVERLAPPING_WINDOW",
        }
    }
}

/// A half-open placement (or ownership) window for overlap checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSpan {
    /// The window being described.
    pub id: PlacementId,
    /// Window start (inclusive).
    pub start: NaiveDate,
    /// Window end (exclusive); `None` while open.
    pub end: Option<NaiveDate>,
}

/// Validates a candidate window against the horse's existing windows.
///
/// When editing, pass the record's own ID as `exclude` so it is not
/// compared against itself.
///
/// # Errors
///
/// - `EndBeforeStart` when the candidate range is empty or inverted
/// - `Overlapping` when any existing window shares a chargeable day
pub fn validate_no_overlap(
    horse_id: HorseId,
    start: NaiveDate,
    end: Option<NaiveDate>,
    existing: &[PlacementSpan],
    exclude: Option<PlacementId>,
) -> Result<(), PlacementError> {
    if let Some(end_date) = end {
        if end_date <= start {
            return Err(PlacementError::EndBeforeStart {
                start,
                end: end_date,
            });
        }
    }

    for span in existing {
        if exclude == Some(span.id) {
            continue;
        }
        if spans_overlap(start, end, span.start, span.end) {
            return Err(PlacementError::Overlapping {
                horse_id,
                existing_start: span.start,
                existing_end: span
                    .end
                    .map_or_else(|| "present".to_string(), |e| e.to_string()),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn span(start: NaiveDate, end: Option<NaiveDate>) -> PlacementSpan {
        PlacementSpan {
            id: PlacementId::new(),
            start,
            end,
        }
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = validate_no_overlap(
            HorseId::new(),
            date(2024, 3, 1),
            Some(date(2024, 2, 1)),
            &[],
            None,
        )
        .unwrap_err();
        assert!(matches!(err, PlacementError::EndBeforeStart { .. }));
    }

    #[test]
    fn test_rejects_overlap_with_open_window() {
        let existing = [span(date(2024, 1, 1), None)];
        let err = validate_no_overlap(
            HorseId::new(),
            date(2024, 6, 1),
            Some(date(2024, 7, 1)),
            &existing,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, PlacementError::Overlapping { .. }));
    }

    #[test]
    fn test_accepts_window_after_closed_one() {
        let existing = [span(date(2024, 1, 1), Some(date(2024, 2, 1)))];
        assert!(
            validate_no_overlap(HorseId::new(), date(2024, 2, 1), None, &existing, None).is_ok(),
            "a window starting the day the previous one ended is allowed"
        );
    }

    #[test]
    fn test_rejects_open_window_before_existing() {
        // An open window starting before an existing one swallows it.
        let existing = [span(date(2024, 6, 1), Some(date(2024, 7, 1)))];
        let err =
            validate_no_overlap(HorseId::new(), date(2024, 1, 1), None, &existing, None)
                .unwrap_err();
        assert!(matches!(err, PlacementError::Overlapping { .. }));
    }

    #[test]
    fn test_excluded_record_is_ignored() {
        let own = span(date(2024, 1, 1), Some(date(2024, 2, 1)));
        assert!(
            validate_no_overlap(
                HorseId::new(),
                date(2024, 1, 1),
                Some(date(2024, 3, 1)),
                &[own],
                Some(own.id),
            )
            .is_ok(),
            "editing a record must not conflict with itself"
        );
    }

    #[test]
    fn test_overlap_message_names_open_end_as_present() {
        let existing = [span(date(2024, 1, 1), None)];
        let err = validate_no_overlap(HorseId::new(), date(2024, 2, 1), None, &existing, None)
            .unwrap_err();
        assert!(err.to_string().contains("present"));
    }
}

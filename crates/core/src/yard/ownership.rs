//! Ownership windows.
//!
//! A horse has exactly one owner at a time; history is a sequence of
//! non-overlapping half-open windows. When billing, each placement is
//! clipped to the invoiced owner's window so an ownership change mid-period
//! bills each owner only for their days.

use chrono::NaiveDate;
use paddock_shared::types::{HorseId, OwnerId};

/// One owner's tenure of a horse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipWindow {
    /// The horse.
    pub horse_id: HorseId,
    /// The owner during this window.
    pub owner_id: OwnerId,
    /// Window start (inclusive).
    pub start: NaiveDate,
    /// Window end (exclusive); `None` while current.
    pub end: Option<NaiveDate>,
}

impl OwnershipWindow {
    /// Returns true while this window has no end date.
    #[must_use]
    pub const fn is_current(&self) -> bool {
        self.end.is_none()
    }
}

/// Clips a half-open span to an ownership window. Returns the clipped
/// `(start, end)` — `end` still `None` if both inputs are open — or `None`
/// when the span and window share no days.
#[must_use]
pub fn clip_to_window(
    start: NaiveDate,
    end: Option<NaiveDate>,
    window: &OwnershipWindow,
) -> Option<(NaiveDate, Option<NaiveDate>)> {
    let clipped_start = start.max(window.start);
    let clipped_end = match (end, window.end) {
        (None, None) => None,
        (Some(e), None) => Some(e),
        (None, Some(w)) => Some(w),
        (Some(e), Some(w)) => Some(e.min(w)),
    };

    match clipped_end {
        Some(e) if e <= clipped_start => None,
        _ => Some((clipped_start, clipped_end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(start: NaiveDate, end: Option<NaiveDate>) -> OwnershipWindow {
        OwnershipWindow {
            horse_id: HorseId::new(),
            owner_id: OwnerId::new(),
            start,
            end,
        }
    }

    #[test]
    fn test_open_span_in_open_window_stays_open() {
        let w = window(date(2023, 1, 1), None);
        let clipped = clip_to_window(date(2024, 1, 1), None, &w);
        assert_eq!(clipped, Some((date(2024, 1, 1), None)));
    }

    #[test]
    fn test_span_clipped_to_sold_horse_window() {
        // Horse sold on 15 Jan: the old owner's window ends there.
        let w = window(date(2023, 1, 1), Some(date(2024, 1, 15)));
        let clipped = clip_to_window(date(2024, 1, 1), None, &w).unwrap();
        assert_eq!(clipped, (date(2024, 1, 1), Some(date(2024, 1, 15))));
    }

    #[test]
    fn test_span_before_window_is_dropped() {
        let w = window(date(2024, 6, 1), None);
        assert!(clip_to_window(date(2024, 1, 1), Some(date(2024, 2, 1)), &w).is_none());
    }

    #[test]
    fn test_window_start_clips_span_start() {
        let w = window(date(2024, 1, 10), None);
        let clipped = clip_to_window(date(2024, 1, 1), Some(date(2024, 2, 1)), &w).unwrap();
        assert_eq!(clipped, (date(2024, 1, 10), Some(date(2024, 2, 1))));
    }

    #[test]
    fn test_is_current() {
        assert!(window(date(2024, 1, 1), None).is_current());
        assert!(!window(date(2024, 1, 1), Some(date(2024, 2, 1))).is_current());
    }
}

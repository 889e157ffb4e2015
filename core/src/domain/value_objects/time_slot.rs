//! Time slot value object for property bookings.
//!
//! Slots are same-day wall-clock intervals; bookings never span midnight.
//! Intervals are half-open `[start, end)`, so a slot ending at 10:00 and
//! one starting at 10:00 do not overlap.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

const TIME_FORMAT: &str = "%H:%M";

/// An ordered wall-clock interval within a single calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    /// Create a slot, rejecting `end <= start`
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::InvalidTimeSlot);
        }
        Ok(Self { start, end })
    }

    /// Parse a slot from `"HH:MM"` strings
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = NaiveTime::parse_from_str(start, TIME_FORMAT).map_err(|_| {
            ValidationError::InvalidFormat {
                field: "startTime".to_string(),
            }
        })?;
        let end = NaiveTime::parse_from_str(end, TIME_FORMAT).map_err(|_| {
            ValidationError::InvalidFormat {
                field: "endTime".to_string(),
            }
        })?;
        Self::new(start, end)
    }

    /// Half-open interval overlap test: `s1 < e2 && s2 < e1`.
    ///
    /// Touching boundaries never overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Format the start time as `"HH:MM"`
    pub fn start_string(&self) -> String {
        self.start.format(TIME_FORMAT).to_string()
    }

    /// Format the end time as `"HH:MM"`
    pub fn end_string(&self) -> String {
        self.end.format(TIME_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::parse(start, end).unwrap()
    }

    #[test]
    fn test_rejects_unordered_slot() {
        assert_eq!(
            TimeSlot::parse("11:00", "10:00"),
            Err(ValidationError::InvalidTimeSlot)
        );
        assert_eq!(
            TimeSlot::parse("10:00", "10:00"),
            Err(ValidationError::InvalidTimeSlot)
        );
    }

    #[test]
    fn test_rejects_malformed_times() {
        assert!(matches!(
            TimeSlot::parse("25:00", "26:00"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            TimeSlot::parse("10:00", "noon"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = slot("10:00", "11:00");
        let b = slot("10:30", "11:30");
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = slot("09:00", "17:00");
        let inner = slot("12:00", "13:00");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_touching_boundaries_do_not_overlap() {
        let first = slot("10:00", "11:00");
        let second = slot("11:00", "12:00");
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_disjoint_slots_do_not_overlap() {
        let morning = slot("08:00", "09:00");
        let afternoon = slot("14:00", "15:00");
        assert!(!morning.overlaps(&afternoon));
        assert!(!afternoon.overlaps(&morning));
    }

    #[test]
    fn test_identical_slots_overlap() {
        let a = slot("10:00", "11:00");
        assert!(a.overlaps(&a));
    }

    #[test]
    fn test_overlap_matches_formula() {
        // overlaps(A, B) == (s1 < e2 && s2 < e1) across a small grid
        let times = ["08:00", "09:00", "10:00", "11:00", "12:00"];
        for (i1, s1) in times.iter().enumerate() {
            for e1 in &times[i1 + 1..] {
                for (i2, s2) in times.iter().enumerate() {
                    for e2 in &times[i2 + 1..] {
                        let a = slot(s1, e1);
                        let b = slot(s2, e2);
                        let expected = a.start < b.end && b.start < a.end;
                        assert_eq!(a.overlaps(&b), expected, "{s1}-{e1} vs {s2}-{e2}");
                    }
                }
            }
        }
    }
}

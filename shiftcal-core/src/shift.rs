//! The shift record type.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single person's scheduled work interval on a given date.
///
/// Records come out of the parser fully resolved: `date` always carries a
/// concrete calendar date (continuation lines inherit it from the most
/// recent dated line), and the two wall times are always valid. A special
/// shift carries a single trailing `*` in its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// The date the shift starts on.
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Normalized label, usually a person's name (`"Julia*"` for specials).
    pub description: String,
}

impl Shift {
    /// Whether the shift ends on the calendar day after it starts.
    pub fn spans_midnight(&self) -> bool {
        self.end_time < self.start_time
    }

    /// Start of the shift as a local date-time.
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// End of the shift as a local date-time, on the next day when the
    /// shift spans midnight.
    pub fn end(&self) -> NaiveDateTime {
        let end_date = if self.spans_midnight() {
            self.date + Duration::days(1)
        } else {
            self.date
        };
        end_date.and_time(self.end_time)
    }

    /// The name with the special marker stripped and re-trimmed.
    ///
    /// This is the comparison key for include/exclude filtering and
    /// reminder matching; the marker stays visible in `description`.
    pub fn name(&self) -> &str {
        self.description.trim_end_matches('*').trim_end()
    }

    /// Whether the description carries the trailing `*` marker.
    pub fn is_special(&self) -> bool {
        self.description.ends_with('*')
    }

    /// Whether two shifts occupy intersecting time intervals.
    pub fn overlaps(&self, other: &Shift) -> bool {
        other.start() < self.end() && other.end() > self.start()
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} {}",
            self.date.format("%d.%m."),
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M"),
            self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(start: (u32, u32), end: (u32, u32), description: &str) -> Shift {
        Shift {
            date: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_end_lands_on_next_day_when_spanning_midnight() {
        let s = shift((17, 0), (1, 0), "Thomas");
        assert!(s.spans_midnight());
        assert_eq!(
            s.end(),
            NaiveDate::from_ymd_opt(2025, 5, 1)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_end_stays_on_same_day_otherwise() {
        let s = shift((0, 0), (8, 0), "Sarah");
        assert!(!s.spans_midnight());
        assert_eq!(s.end().date(), s.date);
    }

    #[test]
    fn test_name_strips_special_marker() {
        let s = shift((18, 0), (2, 0), "Julia*");
        assert_eq!(s.name(), "Julia");
        assert!(s.is_special());

        let plain = shift((18, 0), (2, 0), "Julia");
        assert_eq!(plain.name(), "Julia");
        assert!(!plain.is_special());
    }

    #[test]
    fn test_overlapping_intervals() {
        let a = shift((17, 0), (1, 0), "Thomas");
        let b = shift((18, 0), (2, 0), "Julia");
        let c = shift((8, 0), (16, 0), "Sarah");

        assert!(a.overlaps(&b), "17:00-01:00 should overlap 18:00-02:00");
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c), "17:00-01:00 should not overlap 08:00-16:00");
    }
}

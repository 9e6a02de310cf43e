// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and calendar-day bucketing.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The caller's notion of "today", with the offset used to place events on
/// calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDay {
    pub today: NaiveDate,
    pub offset: FixedOffset,
}

impl ReferenceDay {
    /// Derive today from a wall-clock instant seen through `offset`.
    pub fn at(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            today: now.with_timezone(&offset).date_naive(),
            offset,
        }
    }

    /// A reference day in UTC.
    pub fn utc(today: NaiveDate) -> Self {
        Self {
            today,
            offset: Utc.fix(),
        }
    }

    /// Calendar date of `timestamp` in this reference offset.
    pub fn local_date(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        timestamp.with_timezone(&self.offset).date_naive()
    }

    pub fn is_today(&self, timestamp: DateTime<Utc>) -> bool {
        self.local_date(timestamp) == self.today
    }
}

/// Build a fixed offset from minutes east of UTC.
///
/// Returns `None` outside the range real timezones use (UTC-12:00 to UTC+14:00).
pub fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    if !(-12 * 60..=14 * 60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(minutes * 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reference_day_shifts_date_with_offset() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 20, 30, 0).unwrap();
        let tokyo = offset_from_minutes(9 * 60).unwrap();

        assert_eq!(
            ReferenceDay::at(now, Utc.fix()).today,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert_eq!(
            ReferenceDay::at(now, tokyo).today,
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()
        );
    }

    #[test]
    fn test_local_date_uses_reference_offset() {
        let day = ReferenceDay::at(
            Utc.with_ymd_and_hms(2024, 3, 11, 1, 0, 0).unwrap(),
            offset_from_minutes(-5 * 60).unwrap(),
        );
        // 03:00 UTC on the 11th is still the 10th at UTC-5
        let event_time = Utc.with_ymd_and_hms(2024, 3, 11, 3, 0, 0).unwrap();
        assert_eq!(
            day.local_date(event_time),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert!(day.is_today(event_time));
    }

    #[test]
    fn test_offset_from_minutes_bounds() {
        assert!(offset_from_minutes(14 * 60).is_some());
        assert!(offset_from_minutes(-12 * 60).is_some());
        assert!(offset_from_minutes(14 * 60 + 1).is_none());
        assert!(offset_from_minutes(-13 * 60).is_none());
    }

    #[test]
    fn test_format_utc_rfc3339() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-01-15T10:00:00Z");
    }
}

/*
    reminiscence-rs | Rust CLI tool to relive last year's seasons on Spotify.
    Copyright (C) 2025  Israel Alberto Roldan Vega

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use crate::season::{CalendarWindow, MonthDay};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Concrete start and end of the season to look back on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Picks the summer override when `summer` is set, `days` around last year otherwise.
    pub fn build(days: i64, summer: bool, now: DateTime<Utc>) -> Self {
        if summer {
            Self::summer(now)
        } else {
            Self::around_last_year(days, now)
        }
    }

    /// A window of `days` centered on this day one year ago.
    ///
    /// `days / 2` truncates, so odd spans lose a day. Negative spans produce a
    /// reversed range, which the matcher reads as a wrapping window. Spans past
    /// chrono's limits saturate at the earliest or latest representable instant.
    pub fn around_last_year(days: i64, now: DateTime<Utc>) -> Self {
        let anchor = shift(now, -365);
        let half = days / 2;
        Self {
            start: shift(anchor, -half),
            end: shift(anchor, half),
        }
    }

    /// June 1 to August 31 of the year of `now`.
    pub fn summer(now: DateTime<Utc>) -> Self {
        let year = now.year();
        Self {
            start: day_at(year, 6, 1, 0, 0, 0),
            end: day_at(year, 8, 31, 23, 59, 59),
        }
    }

    pub fn window(&self) -> CalendarWindow {
        CalendarWindow::new(MonthDay::of(&self.start), MonthDay::of(&self.end))
    }

    pub fn playlist_name(&self) -> String {
        format!(
            "reminiscence {} - {}",
            self.start.format("%B %d"),
            self.end.format("%B %d")
        )
    }

    pub fn playlist_description(&self) -> String {
        format!(
            "Songs between {} and {}, created by reminiscence",
            self.start.format("%B %d"),
            self.end.format("%B %d")
        )
    }
}

fn shift(date: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    let saturated = if days < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    };
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(saturated)
}

fn day_at(year: i32, month: u32, day: u32, h: u32, m: u32, s: u32) -> DateTime<Utc> {
    // June 1 and August 31 exist in every year.
    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .unwrap_or_default();
    Utc.from_utc_datetime(&naive)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 14, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_range_is_centered_on_last_year() {
        let range = DateRange::around_last_year(30, now());
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 9, 29, 18, 30, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2025, 10, 29, 18, 30, 0).unwrap());
        assert_eq!(range.window().start, MonthDay::new(9, 29).unwrap());
        assert_eq!(range.window().end, MonthDay::new(10, 29).unwrap());
    }

    #[test]
    fn test_odd_span_truncates() {
        let range = DateRange::around_last_year(7, now());
        assert_eq!(range.end - range.start, Duration::days(6));
    }

    #[test]
    fn test_zero_span_is_a_single_day() {
        let range = DateRange::around_last_year(0, now());
        assert_eq!(range.start, range.end);
        assert_eq!(range.window().start, range.window().end);
    }

    #[test]
    fn test_negative_span_reverses_without_failing() {
        let range = DateRange::around_last_year(-30, now());
        assert!(range.start > range.end);
        assert!(range.window().is_wrapping());
    }

    #[test]
    fn test_huge_spans_saturate() {
        let range = DateRange::around_last_year(i64::MAX, now());
        assert_eq!(range.start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(range.end, DateTime::<Utc>::MAX_UTC);

        let range = DateRange::around_last_year(400_000_000, now());
        assert_eq!(range.start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(range.end, DateTime::<Utc>::MAX_UTC);
        assert!(range.window().contains(MonthDay::new(7, 4).unwrap()));

        let reversed = DateRange::around_last_year(i64::MIN, now());
        assert_eq!(reversed.start, DateTime::<Utc>::MAX_UTC);
        assert_eq!(reversed.end, DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_summer_ignores_span() {
        let range = DateRange::build(90, true, now());
        assert_eq!(range.start, Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap());
        assert_eq!(range.end, Utc.with_ymd_and_hms(2026, 8, 31, 23, 59, 59).unwrap());
        assert_eq!(DateRange::build(90, false, now()), DateRange::around_last_year(90, now()));
    }

    #[test]
    fn test_playlist_naming() {
        let range = DateRange::around_last_year(30, now());
        assert_eq!(range.playlist_name(), "reminiscence September 29 - October 29");
        assert_eq!(
            range.playlist_description(),
            "Songs between September 29 and October 29, created by reminiscence"
        );
    }
}

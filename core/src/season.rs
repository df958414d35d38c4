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

//! Year-agnostic calendar windows.
//!
//! Points are `(month, day)` pairs compared lexicographically, so the year
//! forms a circle that a window may wrap around (e.g. December to February).

use crate::models::TrackRef;
use crate::range::DateRange;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SeasonError {
    #[error("Invalid calendar day: month {month}, day {day}")]
    InvalidDay { month: u32, day: u32 },
}

/// A calendar point without a year. Field order gives the `(month, day)` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Validates against a leap year so that February 29 is accepted.
    pub fn new(month: u32, day: u32) -> Result<Self, SeasonError> {
        NaiveDate::from_ymd_opt(2000, month, day)
            .map(|_| Self { month, day })
            .ok_or(SeasonError::InvalidDay { month, day })
    }

    pub fn of<D: Datelike>(date: &D) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// A repeating annual interval. `start > end` wraps across the year end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWindow {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl CalendarWindow {
    pub fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    pub fn is_wrapping(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, point: MonthDay) -> bool {
        in_window(point, self)
    }
}

/// Returns true if `point` lies in `window` on the circular year.
///
/// A window whose start equals its end takes the wrapping branch and so
/// matches every day of the year.
pub fn in_window(point: MonthDay, window: &CalendarWindow) -> bool {
    if window.start < window.end {
        window.start <= point && point <= window.end
    } else {
        point >= window.start || point <= window.end
    }
}

/// True for dates after `cutoff`, i.e. added during the current season.
pub fn is_from_this_year(date: DateTime<Utc>, cutoff: DateTime<Utc>) -> bool {
    date > cutoff
}

/// True if the entry was added in the season of `range` in some earlier year.
pub fn matches_season(item: &TrackRef, range: &DateRange) -> bool {
    let Some(added_at) = item.added_at else {
        return false;
    };

    if is_from_this_year(added_at, range.end) {
        return false;
    }

    in_window(MonthDay::of(&added_at), &range.window())
}

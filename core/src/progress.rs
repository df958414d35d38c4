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

/// Incremental progress emitted while fetching and submitting.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// A fetch of `source` is starting.
    Fetching { source: String },
    /// `count` items of `source` have been retrieved so far.
    Fetched { source: String, count: usize },
    FetchDone { source: String, count: usize },
    /// `done` of `total` URIs have been through submission, failed batches included.
    Submitted { done: usize, total: usize },
    Exporting { source: String, path: String },
}

/// Receives progress events. Reporting never affects the operation itself.
pub trait Reporter {
    fn report(&self, event: Progress);
}

/// Discards every event.
pub struct Silent;

impl Reporter for Silent {
    fn report(&self, _event: Progress) {}
}

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

//! Cleanup applied to matched entries before they are written anywhere.

use crate::models::TrackRef;
use log::warn;
use std::collections::HashSet;

/// Entries ready for submission, oldest first.
#[derive(Debug, Default)]
pub struct Prepared {
    pub tracks: Vec<TrackRef>,
    pub uris: Vec<String>,
}

/// Drops empty containers and tracks without a URI.
pub fn retain_valid(items: Vec<TrackRef>) -> Vec<TrackRef> {
    items.into_iter().filter(|item| item.uri().is_some()).collect()
}

/// Stable sort by `added_at`; entries without a date come first.
pub fn sort_by_added(items: &mut [TrackRef]) {
    items.sort_by_key(|item| item.added_at);
}

/// Keeps the first entry for each URI.
pub fn dedup_by_uri(items: Vec<TrackRef>) -> Vec<TrackRef> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| match item.uri() {
            Some(uri) => seen.insert(uri.to_string()),
            None => false,
        })
        .collect()
}

/// Drops local files, which the playlist endpoint rejects.
pub fn drop_local(items: Vec<TrackRef>) -> Vec<TrackRef> {
    items
        .into_iter()
        .filter(|item| {
            let local = item.track.as_ref().is_some_and(|t| t.is_local());
            if local {
                warn!("Skipping local file, it cannot be added to a playlist: {}", item);
            }
            !local
        })
        .collect()
}

pub fn prepare(items: Vec<TrackRef>) -> Prepared {
    let mut tracks = retain_valid(items);
    sort_by_added(&mut tracks);
    let tracks = drop_local(dedup_by_uri(tracks));

    let uris = tracks
        .iter()
        .filter_map(|t| t.uri().map(str::to_string))
        .collect();

    Prepared { tracks, uris }
}

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

//! Best-effort paginated reads.
//!
//! A failing page ends the read and keeps what was collected; nothing is
//! retried and no error escapes to the caller.

use crate::catalog::{Catalog, CatalogError};
use crate::config::FetchOptions;
use crate::models::{PlaylistRef, TrackRef};
use crate::progress::{Progress, Reporter};
use log::{debug, warn};
use std::future::Future;

/// Why a paginated read stopped.
#[derive(Debug)]
pub enum FetchEnd {
    /// A page came back shorter than requested.
    Exhausted,
    /// `max_items` was reached.
    Capped,
    /// A request failed; the items before it are kept.
    Aborted(CatalogError),
}

#[derive(Debug)]
pub struct FetchOutcome<T> {
    pub items: Vec<T>,
    pub end: FetchEnd,
}

impl<T> FetchOutcome<T> {
    pub fn is_complete(&self) -> bool {
        !matches!(self.end, FetchEnd::Aborted(_))
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Reads every entry of `source`, or of the liked-songs library when its id is `None`.
pub async fn fetch_all(
    catalog: &dyn Catalog,
    source: &PlaylistRef,
    options: &FetchOptions,
    reporter: &dyn Reporter,
) -> FetchOutcome<TrackRef> {
    match source.id.as_deref() {
        Some(id) => {
            paginate(&source.name, options, reporter, |limit, offset| {
                catalog.playlist_items(id, limit, offset)
            })
            .await
        }
        None => {
            paginate(&source.name, options, reporter, |limit, offset| {
                catalog.liked_songs(limit, offset)
            })
            .await
        }
    }
}

/// Lists the current user's playlists.
pub async fn fetch_playlists(
    catalog: &dyn Catalog,
    options: &FetchOptions,
    reporter: &dyn Reporter,
) -> FetchOutcome<PlaylistRef> {
    paginate("your playlists", options, reporter, |limit, offset| {
        catalog.user_playlists(limit, offset)
    })
    .await
}

async fn paginate<T, F, Fut>(
    name: &str,
    options: &FetchOptions,
    reporter: &dyn Reporter,
    mut fetch_page: F,
) -> FetchOutcome<T>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, CatalogError>>,
{
    let page_size = options.page_size.max(1);
    let mut items: Vec<T> = Vec::new();

    reporter.report(Progress::Fetching {
        source: name.to_string(),
    });

    let end = loop {
        reporter.report(Progress::Fetched {
            source: name.to_string(),
            count: items.len(),
        });

        let offset = items.len() as u32;
        let page = match fetch_page(page_size, offset).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Stopped reading {} at offset {}: {}", name, offset, e);
                break FetchEnd::Aborted(e);
            }
        };

        let returned = page.len();
        items.extend(page);
        debug!("{}: offset {} returned {} items", name, offset, returned);

        if returned < page_size as usize {
            break FetchEnd::Exhausted;
        }

        if let Some(max) = options.max_items {
            if items.len() >= max {
                items.truncate(max);
                break FetchEnd::Capped;
            }
        }

        if !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }
    };

    reporter.report(Progress::FetchDone {
        source: name.to_string(),
        count: items.len(),
    });

    FetchOutcome { items, end }
}

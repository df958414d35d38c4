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

//! The remote collection service, as seen by the rest of the crate.

use crate::models::{PlaylistRef, TrackRef};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Spotify API error: {0}")]
    Spotify(#[from] rspotify::ClientError),
    #[error("Invalid Spotify ID: {0}")]
    InvalidId(#[from] rspotify::model::IdError),
    #[error("Catalog request failed: {0}")]
    Request(String),
}

/// Paged reads and batched writes against the user's library.
///
/// Offsets and limits are item counts. Implementations return the raw page;
/// callers own the pagination protocol.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn user_playlists(&self, limit: u32, offset: u32)
        -> Result<Vec<PlaylistRef>, CatalogError>;

    async fn playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TrackRef>, CatalogError>;

    async fn liked_songs(&self, limit: u32, offset: u32) -> Result<Vec<TrackRef>, CatalogError>;

    /// Creates a playlist owned by the current user and returns its id.
    async fn create_playlist(
        &self,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<String, CatalogError>;

    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError>;
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// A recorded call, `(collection, limit, offset)` for reads.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Playlists { limit: u32, offset: u32 },
        Items { id: String, limit: u32, offset: u32 },
        Liked { limit: u32, offset: u32 },
        Create { name: String, public: bool },
        Add { id: String, count: usize },
    }

    /// In-memory catalog that can be told to fail specific requests.
    #[derive(Default)]
    pub struct FakeCatalog {
        pub playlists: Vec<PlaylistRef>,
        pub items: HashMap<String, Vec<TrackRef>>,
        pub liked: Vec<TrackRef>,
        /// Zero-based index of read requests that fail.
        pub fail_reads: Vec<usize>,
        /// Zero-based index of `add_items` calls that fail.
        pub fail_adds: Vec<usize>,
        pub calls: Mutex<Vec<Call>>,
        pub added: Mutex<Vec<String>>,
        reads: Mutex<usize>,
        adds: Mutex<usize>,
    }

    impl FakeCatalog {
        /// A playlist whose pages have the given sizes when read with `page_size`.
        pub fn with_pages(id: &str, sizes: &[usize]) -> Self {
            let total: usize = sizes.iter().sum();
            let tracks = (0..total).map(super::tests_support::track_at).collect();
            let mut items = HashMap::new();
            items.insert(id.to_string(), tracks);
            Self {
                items,
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn next_read(&self) -> Result<(), CatalogError> {
            let mut reads = self.reads.lock().unwrap();
            let index = *reads;
            *reads += 1;
            if self.fail_reads.contains(&index) {
                return Err(CatalogError::Request(format!("read {} refused", index)));
            }
            Ok(())
        }

        fn page<T: Clone>(all: &[T], limit: u32, offset: u32) -> Vec<T> {
            all.iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn user_playlists(
            &self,
            limit: u32,
            offset: u32,
        ) -> Result<Vec<PlaylistRef>, CatalogError> {
            self.record(Call::Playlists { limit, offset });
            self.next_read()?;
            Ok(Self::page(&self.playlists, limit, offset))
        }

        async fn playlist_items(
            &self,
            playlist_id: &str,
            limit: u32,
            offset: u32,
        ) -> Result<Vec<TrackRef>, CatalogError> {
            self.record(Call::Items {
                id: playlist_id.to_string(),
                limit,
                offset,
            });
            self.next_read()?;
            let all = self.items.get(playlist_id).cloned().unwrap_or_default();
            Ok(Self::page(&all, limit, offset))
        }

        async fn liked_songs(
            &self,
            limit: u32,
            offset: u32,
        ) -> Result<Vec<TrackRef>, CatalogError> {
            self.record(Call::Liked { limit, offset });
            self.next_read()?;
            Ok(Self::page(&self.liked, limit, offset))
        }

        async fn create_playlist(
            &self,
            name: &str,
            public: bool,
            _description: &str,
        ) -> Result<String, CatalogError> {
            self.record(Call::Create {
                name: name.to_string(),
                public,
            });
            Ok("created-playlist".to_string())
        }

        async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
            self.record(Call::Add {
                id: playlist_id.to_string(),
                count: uris.len(),
            });
            let mut adds = self.adds.lock().unwrap();
            let index = *adds;
            *adds += 1;
            if self.fail_adds.contains(&index) {
                return Err(CatalogError::Request("Payload contains a non-existing ID".to_string()));
            }
            self.added.lock().unwrap().extend(uris.iter().cloned());
            Ok(())
        }
    }
}

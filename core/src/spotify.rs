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

use crate::catalog::{Catalog, CatalogError};
use crate::models::{PlaylistRef, TrackMeta, TrackRef, LOCAL_URI_PREFIX};
use async_trait::async_trait;
use log::debug;
use rspotify::{
    model::{FullTrack, PlayableId, PlayableItem, PlaylistId, PlaylistItem, SavedTrack, TrackId},
    prelude::*,
    AuthCodeSpotify,
};

/// `Catalog` backed by an authenticated rspotify session.
pub struct SpotifyCatalog {
    spotify: AuthCodeSpotify,
}

impl SpotifyCatalog {
    pub fn new(spotify: AuthCodeSpotify) -> Self {
        Self { spotify }
    }
}

#[async_trait]
impl Catalog for SpotifyCatalog {
    async fn user_playlists(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<PlaylistRef>, CatalogError> {
        let page = self
            .spotify
            .current_user_playlists_manual(Some(limit), Some(offset))
            .await?;

        Ok(page
            .items
            .into_iter()
            .map(|pl| PlaylistRef::new(pl.id.id(), pl.name))
            .collect())
    }

    async fn playlist_items(
        &self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TrackRef>, CatalogError> {
        let playlist_id = PlaylistId::from_id(playlist_id)?;
        let page = self
            .spotify
            .playlist_items_manual(playlist_id, None, None, Some(limit), Some(offset))
            .await?;

        Ok(page.items.into_iter().map(from_playlist_item).collect())
    }

    async fn liked_songs(&self, limit: u32, offset: u32) -> Result<Vec<TrackRef>, CatalogError> {
        let page = self
            .spotify
            .current_user_saved_tracks_manual(None, Some(limit), Some(offset))
            .await?;

        Ok(page.items.into_iter().map(from_saved_track).collect())
    }

    async fn create_playlist(
        &self,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<String, CatalogError> {
        let user = self.spotify.current_user().await?;
        let playlist = self
            .spotify
            .user_playlist_create(user.id, name, Some(public), None, Some(description))
            .await?;

        debug!("Created playlist {} ({})", playlist.name, playlist.id);
        Ok(playlist.id.id().to_string())
    }

    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        let playlist_id = PlaylistId::from_id(playlist_id)?;
        let items = uris
            .iter()
            .map(|uri| TrackId::from_uri(uri).map(PlayableId::Track))
            .collect::<Result<Vec<_>, _>>()?;

        self.spotify.playlist_add_items(playlist_id, items, None).await?;
        Ok(())
    }
}

fn from_playlist_item(item: PlaylistItem) -> TrackRef {
    let track = match item.track {
        Some(PlayableItem::Track(track)) => Some(from_full_track(&track)),
        // Episodes and empty containers cannot be added back as tracks.
        _ => None,
    };

    TrackRef {
        added_at: item.added_at,
        track,
    }
}

fn from_saved_track(item: SavedTrack) -> TrackRef {
    TrackRef {
        added_at: Some(item.added_at),
        track: Some(from_full_track(&item.track)),
    }
}

fn from_full_track(track: &FullTrack) -> TrackMeta {
    let artists: Vec<String> = track.artists.iter().map(|a| a.name.clone()).collect();

    let uri = match &track.id {
        Some(id) => Some(id.uri()),
        None if track.is_local => Some(local_uri(track, &artists)),
        None => None,
    };

    TrackMeta {
        uri,
        name: track.name.clone(),
        artists,
        album: track.album.name.clone(),
    }
}

/// Local files have no catalog id; rebuild the URI shape the Web API reports for them.
fn local_uri(track: &FullTrack, artists: &[String]) -> String {
    format!(
        "{}:{}:{}:{}:{}",
        LOCAL_URI_PREFIX,
        artists.first().map(String::as_str).unwrap_or_default(),
        track.album.name,
        track.name,
        track.duration.num_seconds()
    )
}

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
use crate::config::Settings;
use crate::export::export_playlist;
use crate::fetch::{fetch_all, fetch_playlists, FetchEnd};
use crate::models::{BackupReport, BuildReport, ExportFailure, PlaylistRef, TrackRef};
use crate::mutate::submit_batches;
use crate::pipeline::{prepare, retain_valid, sort_by_added};
use crate::progress::Reporter;
use crate::range::DateRange;
use crate::season::matches_season;
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

/// Compiles reminiscence playlists and backups from the user's library.
pub struct Reminiscence {
    catalog: Arc<dyn Catalog>,
    settings: Settings,
}

impl Reminiscence {
    pub fn new(catalog: Arc<dyn Catalog>, settings: Settings) -> Self {
        Self { catalog, settings }
    }

    /// The user's playlists followed by the liked-songs library.
    pub async fn sources(&self, reporter: &dyn Reporter) -> Vec<PlaylistRef> {
        let outcome =
            fetch_playlists(self.catalog.as_ref(), &self.settings.fetch_options(), reporter).await;
        if let FetchEnd::Aborted(e) = &outcome.end {
            warn!("Playlist listing is incomplete: {}", e);
        }

        let mut sources = outcome.into_items();
        sources.push(PlaylistRef::liked_songs());
        sources
    }

    async fn read(&self, source: &PlaylistRef, reporter: &dyn Reporter) -> Vec<TrackRef> {
        fetch_all(
            self.catalog.as_ref(),
            source,
            &self.settings.fetch_options(),
            reporter,
        )
        .await
        .into_items()
    }

    /// Gathers in-season tracks from `sources` into a new private playlist.
    ///
    /// No playlist is created when nothing matches.
    pub async fn build_playlist(
        &self,
        sources: &[PlaylistRef],
        range: &DateRange,
        reporter: &dyn Reporter,
    ) -> Result<BuildReport, CatalogError> {
        let mut report = BuildReport {
            playlist_name: range.playlist_name(),
            ..Default::default()
        };

        let window = range.window();
        debug!(
            "Season window {} to {}{}",
            window.start,
            window.end,
            if window.is_wrapping() {
                ", wrapping past the year end"
            } else {
                ""
            }
        );

        let mut matched = Vec::new();
        for source in sources {
            let items = self.read(source, reporter).await;
            report.tracks_scanned += items.len();
            report.sources.push(source.name.clone());
            matched.extend(items.into_iter().filter(|item| matches_season(item, range)));
        }
        report.tracks_matched = matched.len();

        let prepared = prepare(matched);
        report.tracks_unique = prepared.uris.len();
        info!(
            "{} of {} scanned tracks are in season ({} unique)",
            report.tracks_matched, report.tracks_scanned, report.tracks_unique
        );

        if prepared.uris.is_empty() {
            return Ok(report);
        }

        let playlist_id = self
            .catalog
            .create_playlist(&report.playlist_name, false, &range.playlist_description())
            .await?;

        let submit = submit_batches(
            self.catalog.as_ref(),
            &playlist_id,
            &prepared.uris,
            &self.settings.batch_options(),
            reporter,
        )
        .await;

        report.playlist_id = Some(playlist_id);
        report.submit = Some(submit);
        Ok(report)
    }

    /// Writes one CSV file per source into `dir`, oldest entries first.
    ///
    /// A source that cannot be written is recorded as failed and the rest still run.
    pub async fn backup(
        &self,
        sources: &[PlaylistRef],
        dir: &Path,
        reporter: &dyn Reporter,
    ) -> BackupReport {
        let mut report = BackupReport::default();

        for source in sources {
            let mut tracks = retain_valid(self.read(source, reporter).await);
            sort_by_added(&mut tracks);

            match export_playlist(dir, source, &tracks, reporter) {
                Ok(exported) => report.exported.push(exported),
                Err(e) => {
                    warn!("Backup of {} failed: {}", source.name, e);
                    report.failed.push(ExportFailure {
                        playlist_name: source.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fake::{Call, FakeCatalog};
    use crate::catalog::tests_support::track;
    use crate::progress::Silent;
    use chrono::{DateTime, TimeZone, Utc};
    use std::time::Duration;

    fn settings() -> Settings {
        Settings {
            request_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn range() -> DateRange {
        DateRange::around_last_year(30, at(2026, 10, 14))
    }

    #[tokio::test]
    async fn test_sources_end_with_liked_songs() {
        let mut catalog = FakeCatalog::default();
        catalog.playlists = vec![PlaylistRef::new("a", "Road Trip")];
        let app = Reminiscence::new(Arc::new(catalog), settings());

        let sources = app.sources(&Silent).await;

        assert_eq!(sources.len(), 2);
        assert!(sources[1].is_liked_songs());
    }

    #[tokio::test]
    async fn test_build_playlist_merges_sources() {
        let mut catalog = FakeCatalog::default();
        catalog.items.insert(
            "a".to_string(),
            vec![
                track("spotify:track:late", at(2023, 10, 20)),
                track("spotify:track:spring", at(2023, 4, 2)),
                track("spotify:track:shared", at(2024, 10, 20)),
            ],
        );
        catalog.liked = vec![
            track("spotify:track:shared", at(2021, 10, 5)),
            track("spotify:track:recent", at(2026, 10, 1)),
        ];
        let catalog = Arc::new(catalog);
        let app = Reminiscence::new(catalog.clone(), settings());
        let sources = vec![PlaylistRef::new("a", "Road Trip"), PlaylistRef::liked_songs()];

        let report = app.build_playlist(&sources, &range(), &Silent).await.unwrap();

        assert_eq!(report.tracks_scanned, 5);
        assert_eq!(report.tracks_matched, 3);
        assert_eq!(report.tracks_unique, 2);
        assert_eq!(report.playlist_id.as_deref(), Some("created-playlist"));
        assert_eq!(
            *catalog.added.lock().unwrap(),
            vec!["spotify:track:shared", "spotify:track:late"]
        );
        assert!(catalog.calls().contains(&Call::Create {
            name: "reminiscence September 29 - October 29".to_string(),
            public: false
        }));
    }

    #[tokio::test]
    async fn test_no_matches_creates_nothing() {
        let mut catalog = FakeCatalog::default();
        catalog.liked = vec![track("spotify:track:spring", at(2023, 4, 2))];
        let catalog = Arc::new(catalog);
        let app = Reminiscence::new(catalog.clone(), settings());

        let report = app
            .build_playlist(&[PlaylistRef::liked_songs()], &range(), &Silent)
            .await
            .unwrap();

        assert_eq!(report.tracks_unique, 0);
        assert!(report.playlist_id.is_none());
        assert!(!catalog
            .calls()
            .iter()
            .any(|c| matches!(c, Call::Create { .. })));
    }

    #[tokio::test]
    async fn test_backup_writes_one_file_per_source() {
        let mut catalog = FakeCatalog::default();
        catalog.items.insert(
            "a".to_string(),
            vec![
                track("spotify:track:2", at(2023, 4, 2)),
                TrackRef {
                    added_at: Some(at(2023, 4, 3)),
                    track: None,
                },
                track("spotify:track:1", at(2022, 1, 1)),
            ],
        );
        let app = Reminiscence::new(Arc::new(catalog), settings());
        let dir = std::env::temp_dir().join(format!("reminiscence-backup-{}", std::process::id()));
        let sources = vec![PlaylistRef::new("a", "Road Trip"), PlaylistRef::liked_songs()];

        let report = app.backup(&sources, &dir, &Silent).await;

        assert!(report.failed.is_empty());
        assert_eq!(report.exported.len(), 2);
        assert_eq!(report.exported[0].rows_written, 2);
        assert_eq!(report.exported[1].rows_written, 0);
        let contents = std::fs::read_to_string(dir.join("Road Trip")).unwrap();
        let first_row = contents.lines().nth(1).unwrap();
        assert!(first_row.starts_with("spotify:track:1,"));
        assert!(dir.join("Liked Songs").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_backup_continues_after_a_failed_file() {
        let mut catalog = FakeCatalog::default();
        catalog.items.insert("b".to_string(), vec![track("spotify:track:1", at(2022, 1, 1))]);
        let app = Reminiscence::new(Arc::new(catalog), settings());
        let dir = std::env::temp_dir().join(format!("reminiscence-failed-{}", std::process::id()));
        // A directory where the first backup file should go makes it unwritable.
        std::fs::create_dir_all(dir.join("Taken")).unwrap();
        let sources = vec![
            PlaylistRef::new("a", "Taken"),
            PlaylistRef::new("b", "Road Trip"),
            PlaylistRef::new("c", ".."),
        ];

        let report = app.backup(&sources, &dir, &Silent).await;

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].playlist_name, "Taken");
        assert_eq!(report.exported.len(), 2);
        assert_eq!(report.exported[0].rows_written, 1);
        assert!(dir.join("Road Trip").is_file());
        assert!(dir.join("__").is_file());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}

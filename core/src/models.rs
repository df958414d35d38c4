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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name of the synthetic liked-songs source.
pub const LIKED_SONGS: &str = "Liked Songs";

/// Prefix of URIs that point at local files instead of catalog tracks.
pub const LOCAL_URI_PREFIX: &str = "spotify:local";

/// Track metadata attached to a collection entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMeta {
    pub uri: Option<String>,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
}

impl TrackMeta {
    pub fn is_local(&self) -> bool {
        self.uri
            .as_deref()
            .is_some_and(|uri| uri.starts_with(LOCAL_URI_PREFIX))
    }
}

/// One entry of a playlist or of the liked-songs library.
///
/// `track` is `None` when the provider returns an empty container, which is
/// how removed tracks and non-track items (episodes) show up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRef {
    pub added_at: Option<DateTime<Utc>>,
    pub track: Option<TrackMeta>,
}

impl TrackRef {
    pub fn uri(&self) -> Option<&str> {
        self.track.as_ref().and_then(|t| t.uri.as_deref())
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let added = self
            .added_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown date".to_string());

        match &self.track {
            Some(track) => write!(
                f,
                "{} - {} (Album: {}) added {}",
                track.name,
                track.artists.join(", "),
                track.album,
                added
            ),
            None => write!(f, "<missing track> added {}", added),
        }
    }
}

/// A source or destination collection. `id == None` is the liked-songs library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRef {
    pub id: Option<String>,
    pub name: String,
}

impl PlaylistRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
        }
    }

    pub fn liked_songs() -> Self {
        Self {
            id: None,
            name: LIKED_SONGS.to_string(),
        }
    }

    pub fn is_liked_songs(&self) -> bool {
        self.id.is_none()
    }
}

/// Outcome of a single batch submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BatchStatus {
    Success,
    Failed(String),
}

/// Detailed log for one submitted batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchLog {
    pub batch_index: usize,
    pub tracks_count: usize,
    pub status: BatchStatus,
}

/// Report of a batched submission to a playlist.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SubmitReport {
    pub total: usize,
    pub submitted: usize,
    pub batch_logs: Vec<BatchLog>,
}

impl SubmitReport {
    pub fn failed_batches(&self) -> usize {
        self.batch_logs
            .iter()
            .filter(|log| log.status != BatchStatus::Success)
            .count()
    }
}

/// Summary written after building a reminiscence playlist.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BuildReport {
    pub playlist_name: String,
    /// `None` when nothing matched and no playlist was created.
    pub playlist_id: Option<String>,
    pub sources: Vec<String>,
    pub tracks_scanned: usize,
    pub tracks_matched: usize,
    pub tracks_unique: usize,
    pub submit: Option<SubmitReport>,
}

/// Result of exporting one playlist to a backup file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub playlist_name: String,
    pub path: std::path::PathBuf,
    pub rows_written: usize,
    pub rows_skipped: usize,
}

/// A playlist whose backup could not be written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportFailure {
    pub playlist_name: String,
    pub reason: String,
}

/// Outcome of a backup run. One failed file never stops the others.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BackupReport {
    pub exported: Vec<ExportReport>,
    pub failed: Vec<ExportFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn meta(uri: Option<&str>) -> TrackMeta {
        TrackMeta {
            uri: uri.map(str::to_string),
            name: "Ghost Track".to_string(),
            artists: vec!["Unknown Artist".to_string(), "Guest".to_string()],
            album: "Lost Album".to_string(),
        }
    }

    #[test]
    fn test_local_uri_detection() {
        assert!(meta(Some("spotify:local:Artist:Album:Song:210")).is_local());
        assert!(!meta(Some("spotify:track:4uLU6hMCjMI75M1A2tKUQC")).is_local());
        assert!(!meta(None).is_local());
    }

    #[test]
    fn test_track_ref_display() {
        let item = TrackRef {
            added_at: Some(Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()),
            track: Some(meta(Some("spotify:track:1"))),
        };

        let display = format!("{}", item);
        assert!(display.contains("Ghost Track"));
        assert!(display.contains("Unknown Artist, Guest"));
        assert!(display.contains("2024-03-15"));

        let empty = TrackRef {
            added_at: None,
            track: None,
        };
        assert_eq!(format!("{}", empty), "<missing track> added unknown date");
    }

    #[test]
    fn test_liked_songs_sentinel() {
        let liked = PlaylistRef::liked_songs();
        assert!(liked.is_liked_songs());
        assert_eq!(liked.name, LIKED_SONGS);
        assert!(!PlaylistRef::new("37i9dQZF1DX", "Road Trip").is_liked_songs());
    }

    #[test]
    fn test_submit_report_counts_failures() {
        let report = SubmitReport {
            total: 250,
            submitted: 150,
            batch_logs: vec![
                BatchLog {
                    batch_index: 0,
                    tracks_count: 100,
                    status: BatchStatus::Success,
                },
                BatchLog {
                    batch_index: 1,
                    tracks_count: 100,
                    status: BatchStatus::Failed("Invalid base62 id".to_string()),
                },
                BatchLog {
                    batch_index: 2,
                    tracks_count: 50,
                    status: BatchStatus::Success,
                },
            ],
        };
        assert_eq!(report.failed_batches(), 1);
    }
}

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

//! CSV backups of whole playlists.
//!
//! Fields are written without quoting, so a comma inside a name shifts the
//! columns of that row. Readers split on commas.

use crate::models::{ExportReport, PlaylistRef, TrackRef};
use crate::progress::{Progress, Reporter};
use csv::{QuoteStyle, WriterBuilder};
use log::{info, warn};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_BACKUP_DIR: &str = "reminiscence_backups";
pub const HEADER: [&str; 5] = ["track_uri", "added_at_time", "name", "artist", "album"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write backup: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode backup: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes the header and one row per well-formed entry, returning `(written, skipped)`.
pub fn write_rows<W: Write>(writer: W, tracks: &[TrackRef]) -> Result<(usize, usize), ExportError> {
    let mut out = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);
    out.write_record(HEADER)?;

    let mut written = 0;
    let mut skipped = 0;
    for item in tracks {
        match row(item) {
            Some(record) => {
                out.write_record(&record)?;
                written += 1;
            }
            None => {
                warn!("Not backed up, the entry is malformed: {:?}", item);
                skipped += 1;
            }
        }
    }

    out.flush()?;
    Ok((written, skipped))
}

fn row(item: &TrackRef) -> Option<[String; 5]> {
    let track = item.track.as_ref()?;
    let uri = track.uri.clone()?;
    let added_at = item.added_at?;

    Some([
        uri,
        added_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        track.name.clone(),
        track.artists.join("-"),
        track.album.clone(),
    ])
}

/// Backs up `tracks` to `dir/<playlist name>`, creating `dir` when needed.
pub fn export_playlist(
    dir: &Path,
    playlist: &PlaylistRef,
    tracks: &[TrackRef],
    reporter: &dyn Reporter,
) -> Result<ExportReport, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(&playlist.name));

    reporter.report(Progress::Exporting {
        source: playlist.name.clone(),
        path: path.display().to_string(),
    });

    let file = File::create(&path)?;
    let (rows_written, rows_skipped) = write_rows(file, tracks)?;
    info!("Saved {} rows of {} to {}", rows_written, playlist.name, path.display());

    Ok(ExportReport {
        playlist_name: playlist.name.clone(),
        path,
        rows_written,
        rows_skipped,
    })
}

fn file_name(playlist_name: &str) -> String {
    let name = playlist_name.replace(['/', '\\'], "_");
    if name.is_empty() {
        "untitled".to_string()
    } else if name.chars().all(|c| c == '.') {
        // "." and ".." resolve to directories.
        name.replace('.', "_")
    } else {
        name
    }
}

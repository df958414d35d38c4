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

use crate::models::PlaylistRef;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SelectionError {
    #[error("No playlists selected")]
    Empty,
    #[error("'{0}' is not a playlist number")]
    NotANumber(String),
    #[error("Playlist number {index} is out of range (1-{count})")]
    OutOfRange { index: usize, count: usize },
}

/// Parses a comma separated list of 1-based choices among `count` options.
///
/// Returns zero-based indices, sorted and without repeats.
pub fn parse_selection(count: usize, raw: &str) -> Result<Vec<usize>, SelectionError> {
    let mut indices = Vec::new();

    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let index: usize = token
            .parse()
            .map_err(|_| SelectionError::NotANumber(token.to_string()))?;
        if index == 0 || index > count {
            return Err(SelectionError::OutOfRange { index, count });
        }
        indices.push(index - 1);
    }

    if indices.is_empty() {
        return Err(SelectionError::Empty);
    }

    indices.sort_unstable();
    indices.dedup();
    Ok(indices)
}

pub fn select<'a>(
    options: &'a [PlaylistRef],
    raw: &str,
) -> Result<Vec<&'a PlaylistRef>, SelectionError> {
    Ok(parse_selection(options.len(), raw)?
        .into_iter()
        .map(|i| &options[i])
        .collect())
}

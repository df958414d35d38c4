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

pub mod auth;
pub mod catalog;
pub mod config;
pub mod export;
pub mod fetch;
pub mod models;
pub mod mutate;
pub mod pipeline;
pub mod progress;
pub mod range;
pub mod reminiscence;
pub mod season;
pub mod select;
pub mod spotify;

// Re-export key items for convenience
pub use auth::get_spotify_client;
pub use catalog::{Catalog, CatalogError};
pub use config::Settings;
pub use models::{BackupReport, BuildReport, ExportReport, PlaylistRef, TrackMeta, TrackRef};
pub use progress::{Progress, Reporter, Silent};
pub use range::DateRange;
pub use reminiscence::Reminiscence;
pub use season::{in_window, CalendarWindow, MonthDay};
pub use spotify::SpotifyCatalog;

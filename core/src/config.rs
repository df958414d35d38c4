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

//! Runtime tuning for paging and batching.
//!
//! Defaults suit the Spotify Web API. Each value can be overridden from the
//! environment (or a `.env` file loaded by the CLI):
//!
//! - `REMINISCENCE_PAGE_SIZE`: items per page request, at most 50.
//! - `REMINISCENCE_BATCH_SIZE`: URIs per add request, 1 to 100.
//! - `REMINISCENCE_REQUEST_DELAY_MS`: pause between consecutive requests.
//! - `REMINISCENCE_MAX_ITEMS`: stop reading a collection after this many items.

use std::env;
use std::time::Duration;
use thiserror::Error;

pub const MAX_PAGE_SIZE: u32 = 50;
pub const MAX_BATCH_SIZE: usize = 100;
pub const DEFAULT_DELAY_MS: u64 = 1500;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} is not a valid number: {value}")]
    NotANumber { name: &'static str, value: String },
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

/// Paging parameters for reads.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    pub page_size: u32,
    pub max_items: Option<usize>,
    pub delay: Duration,
}

/// Batching parameters for writes.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOptions {
    pub batch_size: usize,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub page_size: u32,
    pub batch_size: usize,
    pub request_delay: Duration,
    pub max_items: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            batch_size: MAX_BATCH_SIZE,
            request_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            max_items: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable source; unset names keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(v) = read(&lookup, "REMINISCENCE_PAGE_SIZE", 1, MAX_PAGE_SIZE as u64)? {
            settings.page_size = v as u32;
        }
        if let Some(v) = read(&lookup, "REMINISCENCE_BATCH_SIZE", 1, MAX_BATCH_SIZE as u64)? {
            settings.batch_size = v as usize;
        }
        if let Some(v) = read(&lookup, "REMINISCENCE_REQUEST_DELAY_MS", 0, u64::MAX)? {
            settings.request_delay = Duration::from_millis(v);
        }
        if let Some(v) = read(&lookup, "REMINISCENCE_MAX_ITEMS", 1, u64::MAX)? {
            settings.max_items = Some(v as usize);
        }

        Ok(settings)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            page_size: self.page_size,
            max_items: self.max_items,
            delay: self.request_delay,
        }
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            batch_size: self.batch_size,
            delay: self.request_delay,
        }
    }
}

fn read<F>(lookup: &F, name: &'static str, min: u64, max: u64) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };

    let value: u64 = raw.trim().parse().map_err(|_| ConfigError::NotANumber {
        name,
        value: raw.clone(),
    })?;

    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[]).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.fetch_options().page_size, 50);
        assert_eq!(settings.batch_options().batch_size, 100);
        assert_eq!(settings.request_delay, Duration::from_millis(1500));
        assert_eq!(settings.max_items, None);
    }

    #[test]
    fn test_overrides() {
        let settings = settings_from(&[
            ("REMINISCENCE_PAGE_SIZE", "20"),
            ("REMINISCENCE_BATCH_SIZE", " 50 "),
            ("REMINISCENCE_REQUEST_DELAY_MS", "0"),
            ("REMINISCENCE_MAX_ITEMS", "500"),
        ])
        .unwrap();

        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.batch_size, 50);
        assert_eq!(settings.request_delay, Duration::ZERO);
        assert_eq!(settings.fetch_options().max_items, Some(500));
    }

    #[test]
    fn test_rejects_provider_limits() {
        assert_eq!(
            settings_from(&[("REMINISCENCE_BATCH_SIZE", "101")]),
            Err(ConfigError::OutOfRange {
                name: "REMINISCENCE_BATCH_SIZE",
                value: 101,
                min: 1,
                max: 100,
            })
        );
        assert!(settings_from(&[("REMINISCENCE_PAGE_SIZE", "0")]).is_err());
        assert!(matches!(
            settings_from(&[("REMINISCENCE_MAX_ITEMS", "lots")]),
            Err(ConfigError::NotANumber { .. })
        ));
    }
}

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

use crate::catalog::Catalog;
use crate::config::BatchOptions;
use crate::models::{BatchLog, BatchStatus, SubmitReport};
use crate::progress::{Progress, Reporter};
use log::{debug, warn};

/// Adds `uris` to `playlist_id` in contiguous batches.
///
/// A rejected batch is logged and skipped; later batches are still sent.
pub async fn submit_batches(
    catalog: &dyn Catalog,
    playlist_id: &str,
    uris: &[String],
    options: &BatchOptions,
    reporter: &dyn Reporter,
) -> SubmitReport {
    let batch_size = options.batch_size.max(1);
    let mut report = SubmitReport {
        total: uris.len(),
        ..Default::default()
    };
    let mut done = 0;

    for (i, chunk) in uris.chunks(batch_size).enumerate() {
        if i > 0 && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }

        let status = match catalog.add_items(playlist_id, chunk).await {
            Ok(()) => {
                debug!("Batch {} added {} items", i, chunk.len());
                report.submitted += chunk.len();
                BatchStatus::Success
            }
            Err(e) => {
                warn!("Skipping batch {} ({} items): {}", i, chunk.len(), e);
                BatchStatus::Failed(e.to_string())
            }
        };

        report.batch_logs.push(BatchLog {
            batch_index: i,
            tracks_count: chunk.len(),
            status,
        });

        done += chunk.len();
        reporter.report(Progress::Submitted {
            done,
            total: uris.len(),
        });
    }

    report
}

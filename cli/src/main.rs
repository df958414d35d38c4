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

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::debug;
use reminiscence_core::{
    export::DEFAULT_BACKUP_DIR, get_spotify_client, select::select, DateRange, PlaylistRef,
    Progress, Reminiscence, Reporter, Settings, Silent, SpotifyCatalog,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "reminiscence")]
#[command(about = "Relive what you were listening to this time last year", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Builds a private playlist of songs you added around this date in past years
    Create {
        /// The day range around the current month and day
        #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
        range_in_days: i64,
        /// Use June 1 to August 31 instead of a range around today
        #[arg(long)]
        summer_vibes: bool,
        /// Playlist numbers as shown by `list` (e.g. --playlists=1,4). Prompts when omitted.
        #[arg(long, short = 'p')]
        playlists: Option<String>,
        /// Output the build report to a JSON file
        #[arg(long)]
        json: Option<String>,
    },
    /// Backs up whole playlists to CSV files
    Backup {
        /// Folder for the backup files
        #[arg(long, default_value = DEFAULT_BACKUP_DIR)]
        dir: PathBuf,
        /// Playlist numbers as shown by `list`. Prompts when omitted.
        #[arg(long, short = 'p')]
        playlists: Option<String>,
    },
    /// Lists your playlists with their selection numbers
    List,
}

/// Draws a spinner while reading a source and a bar while submitting.
#[derive(Default)]
struct ConsoleReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl ConsoleReporter {
    fn spinner(message: String) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb
    }

    fn counter(total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::with_template("Adding songs {bar:40.green/white} {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: Progress) {
        let mut bar = self.bar.borrow_mut();
        match event {
            Progress::Fetching { source } => {
                *bar = Some(Self::spinner(format!("Retrieving songs from playlist: {}", source)));
            }
            Progress::Fetched { source, count } => {
                if let Some(pb) = bar.as_ref() {
                    pb.set_message(format!("{}: {} songs", source, count));
                }
            }
            Progress::FetchDone { source, count } => {
                if let Some(pb) = bar.take() {
                    pb.finish_with_message(format!("{}: {} songs to be analyzed", source, count));
                }
            }
            Progress::Submitted { done, total } => {
                let pb = bar.get_or_insert_with(|| Self::counter(total));
                pb.set_position(done as u64);
                if done >= total {
                    pb.finish();
                    *bar = None;
                }
            }
            Progress::Exporting { source, path } => {
                println!("Saving playlist {} at {}", source, path)
            }
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if dotenv().is_err() {
        // Silently ignore
    }

    let cli = Cli::parse();

    match &cli.command {
        Commands::Create {
            range_in_days,
            summer_vibes,
            playlists,
            json,
        } => {
            handle_create(
                *range_in_days,
                *summer_vibes,
                playlists.as_deref(),
                json.as_deref(),
            )
            .await;
        }
        Commands::Backup { dir, playlists } => {
            handle_backup(dir, playlists.as_deref()).await;
        }
        Commands::List => {
            handle_list().await;
        }
    }
}

async fn get_app() -> Reminiscence {
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    debug!("Using {:?}", settings);

    let spotify = match get_spotify_client().await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error initializing Spotify client: {}", e);
            process::exit(1);
        }
    };

    Reminiscence::new(Arc::new(SpotifyCatalog::new(spotify)), settings)
}

fn print_sources(sources: &[PlaylistRef]) {
    println!("===============================================");
    for (i, source) in sources.iter().enumerate() {
        println!("{}. {}", i + 1, source.name);
    }
}

/// Resolves the chosen sources from the flag, or from a stdin prompt.
fn choose_sources(
    sources: &[PlaylistRef],
    preset: Option<&str>,
    verb: &str,
) -> anyhow::Result<Vec<PlaylistRef>> {
    let raw = match preset {
        Some(raw) => raw.to_string(),
        None => {
            println!("Select the playlists to {}:", verb);
            print_sources(sources);
            print!(
                "Enter the numbers of the playlists you want to {}, separated by commas: ",
                verb
            );
            io::stdout().flush()?;

            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read selection")?;
            line
        }
    };

    let chosen = select(sources, &raw)?;
    Ok(chosen.into_iter().cloned().collect())
}

fn save_json<T: Serialize>(path: &str, value: &T) {
    match File::create(path) {
        Ok(mut file) => {
            let json_content = serde_json::to_string_pretty(value).unwrap_or_default();
            if let Err(e) = file.write_all(json_content.as_bytes()) {
                eprintln!();
                eprintln!("[ERROR] Failed to write report to file: {}", e);
            } else {
                println!();
                println!("[SAVED] Report saved to: {}", path);
            }
        }
        Err(e) => eprintln!("[ERROR] Failed to create file '{}': {}", path, e),
    }
}

async fn handle_create(
    range_in_days: i64,
    summer_vibes: bool,
    playlists: Option<&str>,
    json_path: Option<&str>,
) {
    let app = get_app().await;
    let range = DateRange::build(range_in_days, summer_vibes, Utc::now());

    let sources = app.sources(&Silent).await;
    let chosen = match choose_sources(&sources, playlists, "include in the final playlist") {
        Ok(chosen) => chosen,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            process::exit(1);
        }
    };

    match app.build_playlist(&chosen, &range, &ConsoleReporter::default()).await {
        Ok(report) => {
            println!();
            println!("---------------------------------------------------");
            println!("REMINISCENCE");
            println!("---------------------------------------------------");
            println!("Tracks Scanned:  {}", report.tracks_scanned);
            println!("In Season:       {}", report.tracks_matched);
            println!("Unique Tracks:   {}", report.tracks_unique);
            println!("---------------------------------------------------");

            match &report.submit {
                Some(submit) => {
                    println!(
                        "A new playlist has been created with name: \"{}\"!",
                        report.playlist_name
                    );
                    println!("You can find it in your Spotify library.");
                    println!("Total number of songs added: {}", submit.submitted);
                    if submit.failed_batches() > 0 {
                        println!(
                            "[WARN] {} batch(es) were rejected by Spotify and skipped.",
                            submit.failed_batches()
                        );
                    }
                }
                None => {
                    println!(
                        "No songs were found for the current season, so no playlist was created."
                    );
                }
            }

            if let Some(path) = json_path {
                save_json(path, &report);
            }
        }
        Err(e) => {
            eprintln!();
            eprintln!("[ERROR] Playlist creation failed: {}", e);
            process::exit(1);
        }
    }
}

async fn handle_backup(dir: &Path, playlists: Option<&str>) {
    let app = get_app().await;

    let sources = app.sources(&Silent).await;
    let chosen = match choose_sources(&sources, playlists, "backup") {
        Ok(chosen) => chosen,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            process::exit(1);
        }
    };

    println!("Backing up the playlists.. commas inside names are not escaped.");
    let report = app.backup(&chosen, dir, &ConsoleReporter::default()).await;

    println!();
    for exported in &report.exported {
        println!(
            "[SAVED] {} -> {} ({} rows, {} skipped)",
            exported.playlist_name,
            exported.path.display(),
            exported.rows_written,
            exported.rows_skipped
        );
    }
    for failure in &report.failed {
        eprintln!("[ERROR] {} was not backed up: {}", failure.playlist_name, failure.reason);
    }
}

async fn handle_list() {
    let app = get_app().await;
    println!("Fetching your playlists...");

    let sources = app.sources(&Silent).await;
    println!();
    print_sources(&sources);
    println!();
    println!("Tip: run 'reminiscence create --playlists=1,3' to skip the prompt");
}

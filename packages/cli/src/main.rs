#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the melon chart scraper.
//!
//! Each subcommand scrapes one kind of page and writes the records to a
//! JSON file. Running without a subcommand opens an interactive menu.
//!
//! Fetch and write failures are logged but do not change the exit code.

mod interactive;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use melon_chart_cli_utils::{IndicatifProgress, MultiProgress};
use melon_chart_models::{GenreCode, Song};
use melon_chart_scraper::output::{self, OutputFormat};
use melon_chart_scraper::{MelonScraper, ScrapeOutcome, site};
use serde::Serialize;

/// Output file used when `--output` is not given.
const DEFAULT_OUTPUT: &str = "music.json";

#[derive(Parser)]
#[command(name = "melon_chart", about = "Melon album and chart scraper")]
struct Cli {
    /// Site definition TOML to use instead of the embedded Melon layout
    #[arg(long, global = true)]
    site: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct OutputArgs {
    /// JSON file to write (replaced if it exists)
    #[arg(long, short, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

impl OutputArgs {
    const fn format(&self) -> OutputFormat {
        if self.pretty {
            OutputFormat::Pretty
        } else {
            OutputFormat::Compact
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the newest album releases
    Albums {
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Scrape the newest songs in one genre
    Songs {
        /// Genre slug or code (e.g., "ballad" or "GN0100"); prompts if omitted
        #[arg(long)]
        genre: Option<GenreCode>,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Scrape the newest hip-hop songs
    HipHop {
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Scrape the realtime top chart
    Chart {
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Scrape the newest songs of several genres into one file
    Genres {
        /// Comma-separated genre slugs or codes. All genres if omitted.
        #[arg(long, value_delimiter = ',')]
        genres: Vec<GenreCode>,
        /// Maximum number of genre pages fetched at once
        #[arg(long, default_value_t = 1)]
        concurrency: usize,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// List the known genre codes
    ListGenres,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = melon_chart_cli_utils::init_logger();
    let cli = Cli::parse();

    let site = cli
        .site
        .as_deref()
        .map_or_else(|| Ok(site::melon()), site::load_site_file)?;
    log::debug!("Using site definition '{}' ({})", site.id, site.base_url);

    let scraper = MelonScraper::from_site(site)?;

    match cli.command {
        Some(command) => run_command(&scraper, command, &multi).await,
        None => interactive::run(&scraper, &multi).await,
    }
}

async fn run_command(
    scraper: &MelonScraper,
    command: Commands,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Albums { out } => {
            save("albums", &scraper.newest_albums().await, &out);
        }
        Commands::Songs { genre, out } => {
            let genre = genre.map_or_else(interactive::select_genre, Ok)?;
            save("songs", &scraper.newest_songs(genre).await, &out);
        }
        Commands::HipHop { out } => {
            save("songs", &scraper.newest_hip_hop_songs().await, &out);
        }
        Commands::Chart { out } => {
            save("songs", &scraper.top_chart_songs().await, &out);
        }
        Commands::Genres {
            genres,
            concurrency,
            out,
        } => {
            let genres = if genres.is_empty() {
                GenreCode::ALL.to_vec()
            } else {
                genres
            };
            let progress = IndicatifProgress::pages_bar(multi, "Genres");
            let results = scraper
                .newest_songs_for_genres(&genres, concurrency, &progress)
                .await;

            let mut songs: Vec<Song> = Vec::new();
            let mut error = None;
            for (genre, outcome) in results {
                log::debug!("{genre}: {} songs", outcome.records.len());
                songs.extend(outcome.records);
                error = error.or(outcome.error);
            }
            save("songs", &ScrapeOutcome { records: songs, error }, &out);
        }
        Commands::ListGenres => list_genres(),
    }

    Ok(())
}

/// Writes a scrape's records to the requested file.
///
/// The file is written even when the scrape failed, so it always reflects
/// the latest run. Write failures are logged, not returned.
fn save<T: Serialize>(noun: &str, outcome: &ScrapeOutcome<T>, out: &OutputArgs) {
    if let Some(e) = &outcome.error {
        log::warn!("Scrape incomplete ({e}); writing {} {noun}", outcome.records.len());
    }

    match output::write_json(&out.output, &outcome.records, out.format()) {
        Ok(()) => println!(
            "Wrote {} {noun} to {}",
            outcome.records.len(),
            out.output.display()
        ),
        Err(e) => log::error!("Failed to write {}: {e}", out.output.display()),
    }
}

fn list_genres() {
    println!("{:<12} {:<8} NAME", "SLUG", "CODE");
    println!("{}", "-".repeat(40));
    for genre in GenreCode::ALL {
        println!("{:<12} {:<8} {}", genre.to_string(), genre.code(), genre.label());
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_genre_list_in_either_form() {
        let cli = Cli::try_parse_from([
            "melon_chart",
            "genres",
            "--genres",
            "hip-hop,GN0100",
            "--concurrency",
            "4",
        ])
        .unwrap();

        let Some(Commands::Genres {
            genres,
            concurrency,
            out,
        }) = cli.command
        else {
            panic!("expected genres command");
        };
        assert_eq!(genres, vec![GenreCode::HipHop, GenreCode::Ballad]);
        assert_eq!(concurrency, 4);
        assert_eq!(out.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(out.format(), OutputFormat::Compact);
    }

    #[test]
    fn rejects_unknown_genre() {
        assert!(Cli::try_parse_from(["melon_chart", "songs", "--genre", "polka"]).is_err());
    }

    #[test]
    fn output_flags_apply_to_subcommand() {
        let cli =
            Cli::try_parse_from(["melon_chart", "chart", "-o", "top.json", "--pretty"]).unwrap();

        let Some(Commands::Chart { out }) = cli.command else {
            panic!("expected chart command");
        };
        assert_eq!(out.output, PathBuf::from("top.json"));
        assert_eq!(out.format(), OutputFormat::Pretty);
    }
}

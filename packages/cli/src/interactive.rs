//! Interactive menu for running scrapes without memorizing subcommands.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, MultiSelect, Select};
use melon_chart_cli_utils::MultiProgress;
use melon_chart_models::GenreCode;
use melon_chart_scraper::MelonScraper;

use crate::{Commands, DEFAULT_OUTPUT, OutputArgs};

/// Scrapes offered by the interactive menu.
enum Action {
    NewestAlbums,
    GenreSongs,
    HipHopSongs,
    TopChart,
    SeveralGenres,
    ListGenres,
}

impl Action {
    const ALL: &[Self] = &[
        Self::NewestAlbums,
        Self::GenreSongs,
        Self::HipHopSongs,
        Self::TopChart,
        Self::SeveralGenres,
        Self::ListGenres,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::NewestAlbums => "Newest albums",
            Self::GenreSongs => "Newest songs in a genre",
            Self::HipHopSongs => "Newest hip-hop songs",
            Self::TopChart => "Top chart",
            Self::SeveralGenres => "Newest songs across several genres",
            Self::ListGenres => "List genre codes",
        }
    }
}

/// Prompts for a scrape and its output options, then runs it.
///
/// # Errors
///
/// Returns an error if a prompt fails (e.g., stdin is not a terminal).
pub async fn run(
    scraper: &MelonScraper,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Melon Chart Scraper");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to scrape?")
        .items(&labels)
        .default(0)
        .interact()?;

    let command = match Action::ALL[idx] {
        Action::NewestAlbums => Commands::Albums {
            out: prompt_output()?,
        },
        Action::GenreSongs => Commands::Songs {
            genre: Some(select_genre()?),
            out: prompt_output()?,
        },
        Action::HipHopSongs => Commands::HipHop {
            out: prompt_output()?,
        },
        Action::TopChart => Commands::Chart {
            out: prompt_output()?,
        },
        Action::SeveralGenres => {
            let genres = select_genres()?;
            let concurrency = Input::<usize>::new()
                .with_prompt("Pages to fetch at once")
                .default(1)
                .validate_with(|value: &usize| validate_concurrency(*value))
                .interact_text()?;
            Commands::Genres {
                genres,
                concurrency,
                out: prompt_output()?,
            }
        }
        Action::ListGenres => Commands::ListGenres,
    };

    crate::run_command(scraper, command, multi).await
}

const fn validate_concurrency(value: usize) -> Result<(), &'static str> {
    if value == 0 {
        Err("must be at least 1")
    } else {
        Ok(())
    }
}

/// Prompts for a single genre.
///
/// # Errors
///
/// Returns an error if the prompt cannot be shown.
pub fn select_genre() -> Result<GenreCode, dialoguer::Error> {
    let labels: Vec<&str> = GenreCode::ALL.iter().map(|g| g.label()).collect();

    let idx = Select::new()
        .with_prompt("Genre")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(GenreCode::ALL[idx])
}

/// Prompts for any number of genres. Selecting none means all of them.
fn select_genres() -> Result<Vec<GenreCode>, dialoguer::Error> {
    let labels: Vec<&str> = GenreCode::ALL.iter().map(|g| g.label()).collect();

    let selected = MultiSelect::new()
        .with_prompt("Genres (space=toggle, a=all, enter=confirm; none selects all)")
        .items(&labels)
        .interact()?;

    Ok(selected.into_iter().map(|i| GenreCode::ALL[i]).collect())
}

fn prompt_output() -> Result<OutputArgs, dialoguer::Error> {
    let output: String = Input::new()
        .with_prompt("Output file")
        .default(DEFAULT_OUTPUT.to_string())
        .interact_text()?;

    let pretty = Confirm::new()
        .with_prompt("Indent the JSON?")
        .default(false)
        .interact()?;

    Ok(OutputArgs {
        output: PathBuf::from(output),
        pretty,
    })
}

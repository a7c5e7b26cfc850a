//! The compiled extraction mapping.
//!
//! [`ExtractionMapping::compile`] turns the raw selector strings of a
//! [`SitePages`] into parsed [`Selector`]s, checking along the way that each
//! page uses the strategy its record type needs. Compiling once up front
//! keeps the [`crate::extract`] functions infallible.

use scraper::Selector;

use crate::ScrapeError;
use crate::site::{MappingRules, PageDefinition, SitePages};

/// Selectors for a page of album cards.
#[derive(Debug, Clone)]
pub struct AlbumCardMapping {
    /// Repeated element holding one album.
    pub container: Selector,
    /// Album name inside a container.
    pub name: Selector,
    /// Artist name inside a container.
    pub artist: Selector,
}

/// Selectors for a song listing laid out as paired positional groups.
#[derive(Debug, Clone)]
pub struct SongGroupMapping {
    pub container: Selector,
    pub group: Selector,
    pub link: Selector,
}

/// Selectors for a chart table.
#[derive(Debug, Clone)]
pub struct ChartRowMapping {
    /// One row per ranked song.
    pub row: Selector,
    /// Title cell inside a row.
    pub title: Selector,
    /// Artist cell inside a row.
    pub artist: Selector,
}

/// Every page's compiled selectors.
#[derive(Debug, Clone)]
pub struct ExtractionMapping {
    pub new_albums: AlbumCardMapping,
    pub genre_songs: SongGroupMapping,
    pub top_chart: ChartRowMapping,
}

impl ExtractionMapping {
    /// Compiles the selectors of every page.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Selector`] if any selector fails to parse, or
    /// [`ScrapeError::Config`] if a page is configured with a strategy that
    /// does not produce its record type.
    pub fn compile(pages: &SitePages) -> Result<Self, ScrapeError> {
        Ok(Self {
            new_albums: album_cards(&pages.new_albums)?,
            genre_songs: song_groups(&pages.genre_songs)?,
            top_chart: chart_rows(&pages.top_chart)?,
        })
    }
}

fn album_cards(page: &PageDefinition) -> Result<AlbumCardMapping, ScrapeError> {
    match &page.mapping {
        MappingRules::AlbumCards {
            container,
            name,
            artist,
        } => Ok(AlbumCardMapping {
            container: parse_selector(container)?,
            name: parse_selector(name)?,
            artist: parse_selector(artist)?,
        }),
        other => Err(wrong_strategy(page, "album_cards", other)),
    }
}

fn song_groups(page: &PageDefinition) -> Result<SongGroupMapping, ScrapeError> {
    match &page.mapping {
        MappingRules::PairedSongGroups {
            container,
            group,
            link,
        } => Ok(SongGroupMapping {
            container: parse_selector(container)?,
            group: parse_selector(group)?,
            link: parse_selector(link)?,
        }),
        other => Err(wrong_strategy(page, "paired_song_groups", other)),
    }
}

fn chart_rows(page: &PageDefinition) -> Result<ChartRowMapping, ScrapeError> {
    match &page.mapping {
        MappingRules::ChartRows { row, title, artist } => Ok(ChartRowMapping {
            row: parse_selector(row)?,
            title: parse_selector(title)?,
            artist: parse_selector(artist)?,
        }),
        other => Err(wrong_strategy(page, "chart_rows", other)),
    }
}

fn wrong_strategy(page: &PageDefinition, expected: &str, found: &MappingRules) -> ScrapeError {
    ScrapeError::Config(format!(
        "page '{}' must use mapping type '{expected}', found '{}'",
        page.path,
        found.type_name()
    ))
}

/// Parses a CSS selector string, returning a [`ScrapeError`] on failure.
fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Selector(format!("invalid CSS selector '{selector}': {e}")))
}

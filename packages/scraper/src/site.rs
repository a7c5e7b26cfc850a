//! Config-driven site definition.
//!
//! [`SiteDefinition`] captures everything page-specific about the scraped
//! site: where each page lives, which headers the site expects, and which
//! selectors pull records out of each page. The default Melon definition is
//! baked into the binary at compile time via [`include_str!`]; an alternate
//! definition can be loaded from disk with [`load_site_file`].

use std::collections::BTreeMap;
use std::path::Path;

use melon_chart_models::{GenreCode, PageKind};
use serde::Deserialize;

use crate::ScrapeError;

/// The Melon site definition, embedded at compile time.
const MELON_TOML: &str = include_str!("../sites/melon.toml");

/// Query parameter carrying the genre code on the song listing page.
const GENRE_PARAM: &str = "gnrCode";

// ── Top-level site definition ────────────────────────────────────────────

/// A complete, config-driven description of the scraped site.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteDefinition {
    /// Short identifier (e.g., `"melon"`).
    pub id: String,
    /// Human-readable name for log messages.
    pub name: String,
    /// Scheme and host every page path is appended to.
    pub base_url: String,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Extra HTTP headers sent with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Request timeout override. The HTTP client's default applies when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Per-page paths and extraction rules.
    pub pages: SitePages,
}

/// The three page templates the scraper reads.
#[derive(Debug, Clone, Deserialize)]
pub struct SitePages {
    /// Newest album releases.
    pub new_albums: PageDefinition,
    /// Newest songs for a genre (genre code appended as a query parameter).
    pub genre_songs: PageDefinition,
    /// Realtime top chart.
    pub top_chart: PageDefinition,
}

impl SitePages {
    /// Returns the definition for the given page kind.
    #[must_use]
    pub const fn get(&self, kind: PageKind) -> &PageDefinition {
        match kind {
            PageKind::NewAlbums => &self.new_albums,
            PageKind::GenreSongs => &self.genre_songs,
            PageKind::TopChart => &self.top_chart,
        }
    }
}

/// Where a page lives and how to read it.
#[derive(Debug, Clone, Deserialize)]
pub struct PageDefinition {
    /// Path relative to [`SiteDefinition::base_url`], including the
    /// leading slash.
    pub path: String,
    /// Selector rules for this page.
    pub mapping: MappingRules,
}

// ── Extraction rules ─────────────────────────────────────────────────────

/// Raw selector strings for one page template.
///
/// Compiled into [`crate::mapping::ExtractionMapping`] before use.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MappingRules {
    /// One album per repeated container element.
    AlbumCards {
        /// Repeated element holding one album.
        container: String,
        /// Album name, relative to the container.
        name: String,
        /// Artist name, relative to the container.
        artist: String,
    },
    /// Songs laid out as a flat run of sibling groups inside each
    /// container: title group, artist group, title group, ...
    PairedSongGroups {
        /// Repeated song-info element.
        container: String,
        /// Positional child group, relative to the container.
        group: String,
        /// Link whose text is the field value, relative to a group.
        link: String,
    },
    /// One song per table row.
    ChartRows {
        /// Row selector, keyed by a row-identifying attribute.
        row: String,
        /// Title cell, relative to the row.
        title: String,
        /// Artist cell, relative to the row.
        artist: String,
    },
}

impl MappingRules {
    /// Name of the `type` tag for this rule set, as written in TOML.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::AlbumCards { .. } => "album_cards",
            Self::PairedSongGroups { .. } => "paired_song_groups",
            Self::ChartRows { .. } => "chart_rows",
        }
    }
}

// ── URLs ─────────────────────────────────────────────────────────────────

impl SiteDefinition {
    /// Absolute URL for a page kind.
    #[must_use]
    pub fn page_url(&self, kind: PageKind) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.pages.get(kind).path
        )
    }

    /// Absolute URL of the song listing for a genre.
    #[must_use]
    pub fn genre_songs_url(&self, genre: GenreCode) -> String {
        let url = self.page_url(PageKind::GenreSongs);
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{url}{separator}{GENRE_PARAM}={}", genre.code())
    }
}

// ── Loading ──────────────────────────────────────────────────────────────

/// Parses a site definition from a TOML string.
///
/// # Errors
///
/// Returns [`ScrapeError::Config`] if the TOML is malformed or does not
/// match the [`SiteDefinition`] schema.
pub fn parse_site_toml(toml_str: &str) -> Result<SiteDefinition, ScrapeError> {
    toml::de::from_str(toml_str).map_err(|e| ScrapeError::Config(e.to_string()))
}

/// Reads and parses a site definition from disk.
///
/// # Errors
///
/// Returns [`ScrapeError::Io`] if the file cannot be read, or
/// [`ScrapeError::Config`] if its contents are not a valid definition.
pub fn load_site_file(path: &Path) -> Result<SiteDefinition, ScrapeError> {
    let contents = std::fs::read_to_string(path)?;
    log::debug!("Loaded site definition from {}", path.display());
    parse_site_toml(&contents)
}

/// Returns the embedded Melon site definition.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (this is a compile-time
/// guarantee since the config is embedded).
#[must_use]
pub fn melon() -> SiteDefinition {
    parse_site_toml(MELON_TOML).unwrap_or_else(|e| panic!("Failed to parse melon.toml: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_embedded_site() {
        let site = melon();
        assert_eq!(site.id, "melon");
        assert!(!site.user_agent.is_empty());
        assert!(site.headers.contains_key("Accept-Language"));
    }

    #[test]
    fn embedded_pages_use_expected_strategies() {
        let site = melon();
        assert_eq!(site.pages.new_albums.mapping.type_name(), "album_cards");
        assert_eq!(
            site.pages.genre_songs.mapping.type_name(),
            "paired_song_groups"
        );
        assert_eq!(site.pages.top_chart.mapping.type_name(), "chart_rows");
    }

    #[test]
    fn builds_page_urls() {
        let site = melon();
        assert_eq!(
            site.page_url(PageKind::NewAlbums),
            "https://www.melon.com/new/album/index.htm"
        );
        assert_eq!(
            site.page_url(PageKind::TopChart),
            "https://www.melon.com/chart/index.htm"
        );
    }

    #[test]
    fn appends_genre_code_to_song_list_url() {
        let site = melon();
        assert_eq!(
            site.genre_songs_url(GenreCode::HipHop),
            "https://www.melon.com/genre/song_list.htm?gnrCode=GN0300"
        );
    }

    #[test]
    fn appends_genre_code_after_existing_query() {
        let mut site = melon();
        "/genre/song_list.htm?steadyYn=Y".clone_into(&mut site.pages.genre_songs.path);
        site.base_url = "https://example.com/".to_string();
        assert_eq!(
            site.genre_songs_url(GenreCode::Ballad),
            "https://example.com/genre/song_list.htm?steadyYn=Y&gnrCode=GN0100"
        );
    }

    #[test]
    fn rejects_unknown_mapping_type() {
        let toml = r#"
            id = "x"
            name = "X"
            base_url = "https://example.com"
            user_agent = "test"

            [pages.new_albums]
            path = "/a"
            [pages.new_albums.mapping]
            type = "carousel"
            container = "div"

            [pages.genre_songs]
            path = "/b"
            [pages.genre_songs.mapping]
            type = "paired_song_groups"
            container = "div"
            group = "div"
            link = "a"

            [pages.top_chart]
            path = "/c"
            [pages.top_chart.mapping]
            type = "chart_rows"
            row = "tr"
            title = "a"
            artist = "a"
        "#;
        assert!(matches!(
            parse_site_toml(toml),
            Err(ScrapeError::Config(_))
        ));
    }
}

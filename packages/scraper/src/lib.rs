#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selector-driven scraping of melon.com album and chart pages.
//!
//! [`MelonScraper`] exposes one entry point per scrape kind (newest albums,
//! newest songs for a genre, the top chart). Each one fetches a single page
//! through a [`PageFetcher`], runs the page's compiled selectors from the
//! [`ExtractionMapping`] over the parsed document, and returns the records
//! it found as a [`ScrapeOutcome`].
//!
//! Failures never abort a scrape: a page that cannot be fetched yields an
//! empty record list with the error reported alongside it. Persisting the
//! records is a separate step handled by [`output`].

pub mod extract;
pub mod fetch;
pub mod mapping;
pub mod normalize;
pub mod output;
pub mod progress;
pub mod site;

use std::sync::Arc;

use futures::StreamExt as _;
use melon_chart_models::{Album, GenreCode, PageKind, Song};
use scraper::Html;

pub use fetch::{HttpFetcher, PageFetcher};
pub use mapping::ExtractionMapping;
pub use site::SiteDefinition;

use crate::progress::ProgressCallback;

/// Errors that can occur during scraping operations.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Encoding records as JSON failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A CSS selector in the site definition could not be parsed.
    #[error("Selector error: {0}")]
    Selector(String),

    /// The site definition is malformed.
    #[error("Config error: {0}")]
    Config(String),
}

impl ScrapeError {
    /// Whether this error came from fetching a page.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// The records a scrape produced, plus the error that cut it short, if any.
///
/// A page that loaded but matched nothing has empty `records` and no
/// `error`; a page that failed to load has empty `records` and `Some` error.
#[derive(Debug)]
pub struct ScrapeOutcome<T> {
    /// Records extracted from the page.
    pub records: Vec<T>,
    /// Why the page could not be scraped.
    pub error: Option<ScrapeError>,
}

impl<T> ScrapeOutcome<T> {
    const fn ok(records: Vec<T>) -> Self {
        Self {
            records,
            error: None,
        }
    }

    const fn failed(error: ScrapeError) -> Self {
        Self {
            records: Vec::new(),
            error: Some(error),
        }
    }

    /// Whether the page was fetched and extracted without error.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into a `Result`, discarding records if an error occurred.
    ///
    /// # Errors
    ///
    /// Returns the captured [`ScrapeError`] if the scrape failed.
    pub fn into_result(self) -> Result<Vec<T>, ScrapeError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.records),
        }
    }
}

/// Scrapes the pages described by a [`SiteDefinition`].
pub struct MelonScraper<F: PageFetcher = HttpFetcher> {
    site: SiteDefinition,
    mapping: ExtractionMapping,
    fetcher: F,
}

impl MelonScraper<HttpFetcher> {
    /// Creates a scraper that fetches pages over HTTP.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the site's selectors or headers are
    /// invalid, or the HTTP client cannot be built.
    pub fn from_site(site: SiteDefinition) -> Result<Self, ScrapeError> {
        let fetcher = HttpFetcher::new(&site)?;
        Self::with_fetcher(site, fetcher)
    }
}

impl<F: PageFetcher> MelonScraper<F> {
    /// Creates a scraper that retrieves pages through `fetcher`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the site's selectors fail to compile.
    pub fn with_fetcher(site: SiteDefinition, fetcher: F) -> Result<Self, ScrapeError> {
        let mapping = ExtractionMapping::compile(&site.pages)?;
        log::debug!("Compiled extraction mapping for {}", site.name);
        Ok(Self {
            site,
            mapping,
            fetcher,
        })
    }

    /// The site definition this scraper reads.
    #[must_use]
    pub const fn site(&self) -> &SiteDefinition {
        &self.site
    }

    /// Scrapes the newest album releases.
    pub async fn newest_albums(&self) -> ScrapeOutcome<Album> {
        let url = self.site.page_url(PageKind::NewAlbums);
        self.scrape(PageKind::NewAlbums, &url, |doc| {
            extract::albums(doc, &self.mapping.new_albums)
        })
        .await
    }

    /// Scrapes the newest songs in `genre`.
    pub async fn newest_songs(&self, genre: GenreCode) -> ScrapeOutcome<Song> {
        let url = self.site.genre_songs_url(genre);
        self.scrape(PageKind::GenreSongs, &url, |doc| {
            extract::paired_songs(doc, &self.mapping.genre_songs)
        })
        .await
    }

    /// Scrapes the newest hip-hop songs.
    pub async fn newest_hip_hop_songs(&self) -> ScrapeOutcome<Song> {
        self.newest_songs(GenreCode::HipHop).await
    }

    /// Scrapes the current top chart.
    pub async fn top_chart_songs(&self) -> ScrapeOutcome<Song> {
        let url = self.site.page_url(PageKind::TopChart);
        self.scrape(PageKind::TopChart, &url, |doc| {
            extract::chart_rows(doc, &self.mapping.top_chart)
        })
        .await
    }

    /// Scrapes the newest songs for several genres, running up to
    /// `concurrency` page fetches at once.
    ///
    /// Results come back in the same order as `genres`. Each genre's page
    /// is extracted independently; one failing genre does not affect the
    /// others.
    pub async fn newest_songs_for_genres(
        &self,
        genres: &[GenreCode],
        concurrency: usize,
        progress: &Arc<dyn ProgressCallback>,
    ) -> Vec<(GenreCode, ScrapeOutcome<Song>)> {
        progress.set_total(genres.len() as u64);

        let results: Vec<_> = futures::stream::iter(genres.iter().copied())
            .map(|genre| async move {
                let outcome = self.newest_songs(genre).await;
                progress.set_message(format!(
                    "{} ({} songs)",
                    genre.label(),
                    outcome.records.len()
                ));
                progress.inc(1);
                (genre, outcome)
            })
            .buffered(concurrency.max(1))
            .collect()
            .await;

        let failed = results.iter().filter(|(_, o)| !o.is_ok()).count();
        progress.finish(format!("{} genres scraped, {failed} failed", genres.len()));

        results
    }

    async fn scrape<T>(
        &self,
        kind: PageKind,
        url: &str,
        extract: impl FnOnce(&Html) -> Vec<T>,
    ) -> ScrapeOutcome<T> {
        log::info!("[{kind}] Fetching {url}");

        match self.fetcher.fetch(url).await {
            Ok(body) => {
                let records = extract(&Html::parse_document(&body));
                log::info!("[{kind}] Extracted {} records", records.len());
                ScrapeOutcome::ok(records)
            }
            Err(e) => {
                log::error!("[{kind}] Failed to fetch {url}: {e}");
                ScrapeOutcome::failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::progress::null_progress;
    use crate::site::melon;

    /// Serves canned HTML by URL; any other URL fails like a network error.
    struct FixtureFetcher {
        pages: BTreeMap<String, String>,
    }

    impl FixtureFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, body)| ((*url).to_string(), (*body).to_string()))
                    .collect(),
            }
        }
    }

    impl PageFetcher for FixtureFetcher {
        async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
            match self.pages.get(url) {
                Some(body) => Ok(body.clone()),
                // An unparseable URL makes reqwest fail before any I/O.
                None => Err(ScrapeError::Http(
                    reqwest::Client::new().get("not a url").build().unwrap_err(),
                )),
            }
        }
    }

    const ALBUMS_URL: &str = "https://www.melon.com/new/album/index.htm";
    const CHART_URL: &str = "https://www.melon.com/chart/index.htm";

    fn genre_url(genre: GenreCode) -> String {
        format!(
            "https://www.melon.com/genre/song_list.htm?gnrCode={}",
            genre.code()
        )
    }

    const ALBUMS_HTML: &str = r##"<html><body><ul>
        <li><div class="info">
            <a class="album_name" href="#">Armageddon (The 1st Album)</a>
            <span class="checkEllipsis"><a class="artist_name" href="#">aespa</a></span>
        </div></li>
        <li><div class="info">
            <a class="album_name" href="#">How Sweet</a>
            <span class="checkEllipsis"><a class="artist_name" href="#">NewJeans</a></span>
        </div></li>
        </ul></body></html>"##;

    const SONGS_HTML: &str = r##"<html><body>
        <div class="wrap_song_info">
            <div class="ellipsis rank01"><span><a href="#">Smoke (Prod. Dynamicduo)</a></span></div>
            <div class="ellipsis rank02"><a href="#">Dynamicduo</a></div>
        </div>
        <div class="wrap_song_info">
            <div class="ellipsis rank01"><span><a href="#">Lonely</a></span></div>
        </div>
        </body></html>"##;

    fn scraper(pages: &[(&str, &str)]) -> MelonScraper<FixtureFetcher> {
        MelonScraper::with_fetcher(melon(), FixtureFetcher::new(pages)).unwrap()
    }

    #[tokio::test]
    async fn scrapes_newest_albums() {
        let scraper = scraper(&[(ALBUMS_URL, ALBUMS_HTML)]);

        let outcome = scraper.newest_albums().await;

        assert!(outcome.is_ok());
        assert_eq!(
            outcome.records,
            vec![
                Album {
                    name: "Armageddon ".to_string(),
                    artist: "aespa".to_string(),
                },
                Album {
                    name: "How Sweet".to_string(),
                    artist: "NewJeans".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn scrapes_newest_hip_hop_songs_from_genre_url() {
        let url = genre_url(GenreCode::HipHop);
        let scraper = scraper(&[(url.as_str(), SONGS_HTML)]);

        let songs = scraper.newest_hip_hop_songs().await.into_result().unwrap();

        assert_eq!(
            songs,
            vec![Song {
                title: "Smoke ".to_string(),
                artist: "Dynamicduo".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn top_chart_fetch_failure_returns_empty_list_and_network_error() {
        let scraper = scraper(&[]);

        let outcome = scraper.top_chart_songs().await;

        assert!(outcome.records.is_empty());
        assert!(outcome.error.as_ref().is_some_and(ScrapeError::is_network));
    }

    #[tokio::test]
    async fn page_without_matches_is_empty_but_ok() {
        let scraper = scraper(&[(CHART_URL, "<html><body></body></html>")]);

        let outcome = scraper.top_chart_songs().await;

        assert!(outcome.is_ok());
        assert!(outcome.records.is_empty());
    }

    #[tokio::test]
    async fn genre_fan_out_preserves_request_order_and_isolates_failures() {
        let dance = genre_url(GenreCode::Dance);
        let pop = genre_url(GenreCode::Pop);
        let scraper = scraper(&[(dance.as_str(), SONGS_HTML), (pop.as_str(), SONGS_HTML)]);
        let genres = [GenreCode::Pop, GenreCode::Trot, GenreCode::Dance];

        let results = scraper
            .newest_songs_for_genres(&genres, 3, &null_progress())
            .await;

        let order: Vec<GenreCode> = results.iter().map(|(g, _)| *g).collect();
        assert_eq!(order, genres);
        assert_eq!(results[0].1.records.len(), 1);
        assert!(results[1].1.records.is_empty());
        assert!(!results[1].1.is_ok());
        assert_eq!(results[2].1.records.len(), 1);
    }

    #[test]
    fn rejects_site_with_invalid_selector() {
        let mut site = melon();
        site.pages.new_albums.mapping = crate::site::MappingRules::AlbumCards {
            container: "div.info >".to_string(),
            name: "a".to_string(),
            artist: "a".to_string(),
        };
        assert!(matches!(
            MelonScraper::with_fetcher(site, FixtureFetcher::new(&[])),
            Err(ScrapeError::Selector(_))
        ));
    }
}

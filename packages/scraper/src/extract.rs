//! Pure record extraction from parsed pages.
//!
//! Each function takes an already-parsed [`Html`] document and the compiled
//! selectors for its page template and returns the records it finds. No
//! function here touches the network, so all of them can be exercised
//! against static HTML fixtures.
//!
//! A selector that matches nothing simply yields no records.

use melon_chart_models::{Album, Song};
use scraper::{ElementRef, Html, Selector};

use crate::mapping::{AlbumCardMapping, ChartRowMapping, SongGroupMapping};
use crate::normalize::normalize;

/// Extracts one [`Album`] per album card.
///
/// Cards whose name and artist are both empty are skipped. Both fields have
/// parenthetical annotations removed.
#[must_use]
pub fn albums(document: &Html, mapping: &AlbumCardMapping) -> Vec<Album> {
    document
        .select(&mapping.container)
        .filter_map(|card| {
            let name = child_text(card, &mapping.name);
            let artist = child_text(card, &mapping.artist);

            if name.is_empty() && artist.is_empty() {
                return None;
            }

            Some(Album {
                name: normalize(&name),
                artist: normalize(&artist),
            })
        })
        .collect()
}

/// Extracts songs from containers that hold a flat run of positional
/// groups: title, artist, title, artist, ...
///
/// Groups are consumed in document order two at a time. The first group of
/// a pair sets the title; the second sets the artist and emits the song.
/// The counter starts over for every container, and a trailing group with
/// no partner is dropped, so a container with one group yields nothing and
/// one with three groups yields a single song.
#[must_use]
pub fn paired_songs(document: &Html, mapping: &SongGroupMapping) -> Vec<Song> {
    let mut songs = Vec::new();

    for container in document.select(&mapping.container) {
        let mut position = 0_usize;
        let mut title = String::new();

        for group in container.select(&mapping.group) {
            let text = normalize(&first_text(group, &mapping.link));

            if position.is_multiple_of(2) {
                title = text;
            } else {
                songs.push(Song {
                    title: std::mem::take(&mut title),
                    artist: text,
                });
            }

            position += 1;
        }

        if !position.is_multiple_of(2) {
            log::trace!("Dropping unpaired song group '{title}'");
        }
    }

    songs
}

/// Extracts one [`Song`] per chart row.
///
/// Unlike the other page templates, rows are recorded as-is: empty titles
/// or artists are kept and no annotation stripping is applied.
#[must_use]
pub fn chart_rows(document: &Html, mapping: &ChartRowMapping) -> Vec<Song> {
    document
        .select(&mapping.row)
        .map(|row| Song {
            title: child_text(row, &mapping.title),
            artist: child_text(row, &mapping.artist),
        })
        .collect()
}

/// Text of every element matching `selector` under `element`, concatenated
/// in document order and trimmed.
fn child_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Trimmed text of the first element matching `selector` under `element`,
/// or an empty string when nothing matches.
fn first_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned())
        .unwrap_or_default()
}

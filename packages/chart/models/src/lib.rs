#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record and genre types shared across the melon chart toolchain.
//!
//! Every page the scraper understands produces either [`Album`] or [`Song`]
//! records. [`GenreCode`] identifies the genre query parameter used by the
//! site's per-genre song listings.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A newly released album.
///
/// Both fields are free text with parenthetical annotations already
/// stripped by the scraper.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Album {
    /// Album title.
    pub name: String,
    /// Credited artist(s).
    pub artist: String,
}

/// A single song from a genre listing or the top chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Song {
    /// Song title.
    pub title: String,
    /// Credited artist(s).
    pub artist: String,
}

/// The kinds of page the scraper knows how to read.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PageKind {
    /// The "new albums" landing page
    NewAlbums,
    /// The per-genre newest song listing
    GenreSongs,
    /// The realtime top-100 chart
    TopChart,
}

/// Genre query codes accepted by the site's song listing.
///
/// Parses from either the command-line slug (`hip-hop`) or the
/// six-character wire code (`GN0300`), case-insensitively. [`Display`]
/// renders the slug; [`GenreCode::code`] returns the wire code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum GenreCode {
    #[strum(to_string = "ballad", serialize = "GN0100")]
    Ballad,
    #[strum(to_string = "dance", serialize = "GN0200")]
    Dance,
    #[strum(to_string = "hip-hop", serialize = "GN0300")]
    HipHop,
    #[strum(to_string = "rnb-soul", serialize = "GN0400")]
    RnbSoul,
    #[strum(to_string = "indie", serialize = "GN0500")]
    Indie,
    #[strum(to_string = "rock-metal", serialize = "GN0600")]
    RockMetal,
    #[strum(to_string = "trot", serialize = "GN0700")]
    Trot,
    #[strum(to_string = "folk-blues", serialize = "GN0800")]
    FolkBlues,
    #[strum(to_string = "pop", serialize = "GN0900")]
    Pop,
}

impl GenreCode {
    /// Every known genre, in the order the site lists them.
    pub const ALL: &[Self] = &[
        Self::Ballad,
        Self::Dance,
        Self::HipHop,
        Self::RnbSoul,
        Self::Indie,
        Self::RockMetal,
        Self::Trot,
        Self::FolkBlues,
        Self::Pop,
    ];

    /// The `gnrCode` query parameter value for this genre.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ballad => "GN0100",
            Self::Dance => "GN0200",
            Self::HipHop => "GN0300",
            Self::RnbSoul => "GN0400",
            Self::Indie => "GN0500",
            Self::RockMetal => "GN0600",
            Self::Trot => "GN0700",
            Self::FolkBlues => "GN0800",
            Self::Pop => "GN0900",
        }
    }

    /// Human-readable genre name for prompts and listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ballad => "Ballad",
            Self::Dance => "Dance",
            Self::HipHop => "Rap / Hip-hop",
            Self::RnbSoul => "R&B / Soul",
            Self::Indie => "Indie",
            Self::RockMetal => "Rock / Metal",
            Self::Trot => "Trot",
            Self::FolkBlues => "Folk / Blues",
            Self::Pop => "Pop",
        }
    }
}

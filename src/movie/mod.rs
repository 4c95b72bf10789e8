//! Movie records
//!
//! This module provides the movie entity, its kind, and the alternate-title
//! and release-date pairs attached to it. Records are built by the parser
//! from one raw payload object.
mod parser;
mod wire_types;

pub use parser::{FieldWarning, ParsedMovie, parse_movie};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use url::Url;

/// Country used for entries whose wire shape carries no country, and for
/// the default [`Movie::year`] lookup.
pub const DEFAULT_COUNTRY: &str = "USA";

/// Year reported when no release date matches the requested country.
pub const UNKNOWN_YEAR: i32 = 1900;

/// Kind of title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum MovieType {
    /// No type, or a type the client does not know
    #[default]
    None,
    /// Cinema movie
    Movie,
    /// TV movie
    TvMovie,
    /// TV series
    TvSeries,
    /// Video release
    Video,
    /// Video game
    VideoGame,
}

impl MovieType {
    /// All movie types, in declaration order.
    pub const ALL: [MovieType; 6] = [
        MovieType::None,
        MovieType::Movie,
        MovieType::TvMovie,
        MovieType::TvSeries,
        MovieType::Video,
        MovieType::VideoGame,
    ];

    /// Returns the wire code of this type.
    pub const fn code(self) -> &'static str {
        match self {
            MovieType::None => "none",
            MovieType::Movie => "M",
            MovieType::TvMovie => "TV",
            MovieType::TvSeries => "TVS",
            MovieType::Video => "V",
            MovieType::VideoGame => "VG",
        }
    }

    /// Looks up a type by wire code; unknown codes resolve to [`MovieType::None`].
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .unwrap_or(MovieType::None)
    }
}

/// An alternate regional title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AkaTitle {
    pub country: String,
    pub title: String,
}

/// A release date in one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseDate {
    pub country: String,
    pub date: NaiveDate,
}

/// A movie as reported by the metadata service.
///
/// Every list defaults to empty when the source field is missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Movie {
    /// IMDb identifier (e.g. `tt1375666`)
    pub id: Option<String>,
    pub title: Option<String>,
    /// Average user rating, 0 when unknown
    pub rating: f64,
    /// Number of user ratings
    pub vote_count: Option<i64>,
    /// MPAA rating (e.g. `PG-13`)
    pub mpaa_rating: Option<String>,
    pub plot: Option<String>,
    /// Filming locations
    pub location: Option<String>,
    pub poster_url: Option<Url>,
    /// Link to the IMDb page
    pub info_url: Option<Url>,
    pub movie_type: MovieType,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub writers: Vec<String>,
    pub directors: Vec<String>,
    pub actors: Vec<String>,
    pub countries: Vec<String>,
    pub runtimes_minutes: Vec<u32>,
    pub aka_titles: Vec<AkaTitle>,
    pub release_dates: Vec<ReleaseDate>,
}

impl Movie {
    /// Builds a movie from a raw payload object, logging field problems.
    ///
    /// Use [`parse_movie`] to also inspect which fields failed to parse.
    pub fn from_json(json: &serde_json::Map<String, serde_json::Value>) -> Self {
        parse_movie(json).movie
    }

    /// Release year in the United States, see [`Movie::year_for_country`].
    pub fn year(&self) -> i32 {
        self.year_for_country(DEFAULT_COUNTRY)
    }

    /// Release year in the given country.
    ///
    /// Uses the first release date whose country matches exactly, in stored
    /// order, and returns [`UNKNOWN_YEAR`] when none matches.
    pub fn year_for_country(&self, country: &str) -> i32 {
        self.release_dates
            .iter()
            .find(|release| release.country == country)
            .map_or(UNKNOWN_YEAR, |release| release.date.year())
    }
}

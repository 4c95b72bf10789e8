//! Movie payload parser
//!
//! Every field is read independently: a missing or malformed field is
//! recorded as a [`FieldWarning`], logged, and left at its default while
//! the remaining fields are still parsed.

use super::wire_types::{AkaEntry, ReleaseEntry};
use super::{AkaTitle, DEFAULT_COUNTRY, Movie, MovieType, ReleaseDate};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use url::Url;

/// Date format of the single-string release date shape.
const RELEASE_DATE_FORMAT: &str = "%Y%m%d";

/// A field that could not be parsed (fully) from the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    /// Wire key of the field
    pub field: &'static str,
    /// What went wrong
    pub message: String,
}

/// Result of parsing one payload object.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMovie {
    /// The movie, with problematic fields left at their defaults
    pub movie: Movie,
    /// One entry per recovered problem, in field order
    pub warnings: Vec<FieldWarning>,
}

/// Parses a raw payload object into a movie.
///
/// # Examples
///
/// ```
/// use imdbapi_client::parse_movie;
///
/// let json = serde_json::json!({"title": "Inception", "runtime": ["148 min", "n/a"]});
/// let parsed = parse_movie(json.as_object().unwrap());
///
/// assert_eq!(parsed.movie.title.as_deref(), Some("Inception"));
/// assert_eq!(parsed.movie.runtimes_minutes, vec![148]);
/// assert_eq!(parsed.warnings.len(), 1);
/// ```
pub fn parse_movie(json: &Map<String, Value>) -> ParsedMovie {
    let mut parser = MovieParser {
        json,
        warnings: Vec::new(),
    };
    let movie = parser.parse();

    ParsedMovie {
        movie,
        warnings: parser.warnings,
    }
}

struct MovieParser<'a> {
    json: &'a Map<String, Value>,
    warnings: Vec<FieldWarning>,
}

impl<'a> MovieParser<'a> {
    fn parse(&mut self) -> Movie {
        let plot = if self.json.get("plot").is_some_and(|plot| !plot.is_null()) {
            self.string("plot")
        } else {
            self.string("plot_simple")
        };

        Movie {
            id: self.string("imdb_id"),
            title: self.string("title"),
            rating: self.float("rating").unwrap_or_default(),
            vote_count: self.integer("rating_count"),
            mpaa_rating: self.string("rated"),
            plot,
            location: self.string("filming_locations"),
            poster_url: self.url("poster"),
            info_url: self.url("imdb_url"),
            movie_type: self
                .string("type")
                .map_or(MovieType::None, |code| MovieType::from_code(&code)),
            genres: self.strings("genres"),
            languages: self.strings("language"),
            writers: self.strings("writers"),
            directors: self.strings("directors"),
            actors: self.strings("actors"),
            countries: self.strings("country"),
            runtimes_minutes: self.runtimes("runtime"),
            aka_titles: self.aka_titles("also_known_as"),
            release_dates: self.release_dates("release_date"),
        }
    }

    fn warn(&mut self, field: &'static str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(field, %message, "Skipping unparsable movie field");
        self.warnings.push(FieldWarning { field, message });
    }

    /// Reads a scalar as text. Numbers and booleans are stringified.
    fn string(&mut self, field: &'static str) -> Option<String> {
        let json = self.json;
        match json.get(field)? {
            Value::Null => None,
            value => {
                let text = scalar_text(value);
                if text.is_none() {
                    self.warn(field, format!("expected a string, found {value}"));
                }
                text
            }
        }
    }

    fn float(&mut self, field: &'static str) -> Option<f64> {
        let json = self.json;
        let value = json.get(field)?;
        let number = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        if number.is_none() {
            self.warn(field, format!("expected a number, found {value}"));
        }
        number
    }

    fn integer(&mut self, field: &'static str) -> Option<i64> {
        let json = self.json;
        let value = json.get(field)?;
        let number = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        if number.is_none() {
            self.warn(field, format!("expected an integer, found {value}"));
        }
        number
    }

    fn url(&mut self, field: &'static str) -> Option<Url> {
        let text = self.string(field)?;
        match Url::parse(&text) {
            Ok(url) => Some(url),
            Err(e) => {
                self.warn(field, format!("malformed URL {text:?}: {e}"));
                None
            }
        }
    }

    /// Returns the elements of an array field, or `None` if absent or not an array.
    fn array(&mut self, field: &'static str) -> Option<&'a [Value]> {
        let json = self.json;
        match json.get(field)? {
            Value::Array(items) => Some(items.as_slice()),
            other => {
                self.warn(field, format!("expected an array, found {other}"));
                None
            }
        }
    }

    fn strings(&mut self, field: &'static str) -> Vec<String> {
        let Some(items) = self.array(field) else {
            return Vec::new();
        };

        let mut values = Vec::with_capacity(items.len());
        for item in items {
            match scalar_text(item) {
                Some(text) => values.push(text),
                None => self.warn(field, format!("skipping non-text element {item}")),
            }
        }
        values
    }

    /// Parses entries like `"120 min"` into minutes, skipping bad elements.
    fn runtimes(&mut self, field: &'static str) -> Vec<u32> {
        let Some(items) = self.array(field) else {
            return Vec::new();
        };

        let mut minutes = Vec::with_capacity(items.len());
        for item in items {
            let parsed = scalar_text(item).and_then(|text| {
                text.split_whitespace()
                    .next()
                    .and_then(|token| token.parse::<u32>().ok())
            });
            match parsed {
                Some(value) => minutes.push(value),
                None => self.warn(field, format!("skipping runtime {item}")),
            }
        }
        minutes
    }

    /// Reads alternate titles.
    ///
    /// The object shape keeps every entry. Otherwise only the first bare
    /// title is kept, attributed to [`DEFAULT_COUNTRY`].
    fn aka_titles(&mut self, field: &'static str) -> Vec<AkaTitle> {
        let json = self.json;
        let Some(value) = json.get(field) else {
            return Vec::new();
        };

        match serde_json::from_value::<Vec<AkaEntry>>(value.clone()) {
            Ok(entries) => entries
                .into_iter()
                .map(|entry| AkaTitle {
                    country: entry.country,
                    title: entry.title,
                })
                .collect(),
            Err(e) => {
                tracing::debug!(field, error = %e, "Falling back to single title shape");

                let first = match value {
                    Value::Array(items) => items.first(),
                    other => Some(other),
                };
                match first.and_then(Value::as_str) {
                    Some(title) => vec![AkaTitle {
                        country: DEFAULT_COUNTRY.to_string(),
                        title: title.to_string(),
                    }],
                    None => {
                        self.warn(field, format!("unrecognized shape {value}"));
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Reads release dates.
    ///
    /// An array is read entry by entry in the object shape; bad entries are
    /// skipped and the rest kept in order. Any other value is read as one
    /// `yyyyMMdd` date attributed to [`DEFAULT_COUNTRY`].
    fn release_dates(&mut self, field: &'static str) -> Vec<ReleaseDate> {
        let json = self.json;
        let Some(value) = json.get(field) else {
            return Vec::new();
        };

        let Value::Array(items) = value else {
            tracing::debug!(field, "Reading single date shape");

            let parsed = scalar_text(value).and_then(|text| {
                NaiveDate::parse_from_str(text.trim(), RELEASE_DATE_FORMAT).ok()
            });
            return match parsed {
                Some(date) => vec![ReleaseDate {
                    country: DEFAULT_COUNTRY.to_string(),
                    date,
                }],
                None => {
                    self.warn(field, format!("unrecognized release date {value}"));
                    Vec::new()
                }
            };
        };

        let mut releases = Vec::with_capacity(items.len());
        for item in items {
            let release = serde_json::from_value::<ReleaseEntry>(item.clone())
                .map_err(|e| e.to_string())
                .and_then(release_from_entry);
            match release {
                Ok(release) => releases.push(release),
                Err(reason) => {
                    self.warn(field, format!("skipping release date {item}: {reason}"));
                }
            }
        }
        releases
    }
}

fn release_from_entry(entry: ReleaseEntry) -> Result<ReleaseDate, String> {
    let date = i32::try_from(entry.year)
        .ok()
        .zip(u32::try_from(entry.month).ok())
        .zip(u32::try_from(entry.day).ok())
        .and_then(|((year, month), day)| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(|| {
            format!(
                "invalid date {}-{}-{} for {}",
                entry.year, entry.month, entry.day, entry.country
            )
        })?;

    Ok(ReleaseDate {
        country: entry.country,
        date,
    })
}

/// Text of a scalar JSON value; `None` for arrays, objects and null.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> ParsedMovie {
        parse_movie(value.as_object().unwrap())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_payload() {
        let parsed = parse(json!({
            "imdb_id": "tt1375666",
            "title": "Inception",
            "rating": 8.8,
            "rating_count": 1_234_567,
            "rated": "PG-13",
            "plot": "A thief who steals corporate secrets...",
            "filming_locations": "Tangier, Morocco",
            "poster": "http://ia.media-imdb.com/images/M/inception.jpg",
            "imdb_url": "http://www.imdb.com/title/tt1375666/",
            "type": "M",
            "genres": ["Action", "Adventure", "Sci-Fi"],
            "language": ["English", "Japanese", "French"],
            "writers": ["Christopher Nolan"],
            "directors": ["Christopher Nolan"],
            "actors": ["Leonardo DiCaprio", "Joseph Gordon-Levitt"],
            "country": ["USA", "UK"],
            "runtime": ["148 min"],
            "also_known_as": [
                {"country": "Italy", "title": "Inception"},
                {"country": "Argentina", "title": "El origen"}
            ],
            "release_date": [
                {"country": "UK", "year": 2010, "month": 7, "day": 8},
                {"country": "USA", "year": 2010, "month": 7, "day": 16}
            ]
        }));

        assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
        let movie = parsed.movie;
        assert_eq!(movie.id.as_deref(), Some("tt1375666"));
        assert_eq!(movie.title.as_deref(), Some("Inception"));
        assert_eq!(movie.rating, 8.8);
        assert_eq!(movie.vote_count, Some(1_234_567));
        assert_eq!(movie.mpaa_rating.as_deref(), Some("PG-13"));
        assert_eq!(movie.location.as_deref(), Some("Tangier, Morocco"));
        assert_eq!(
            movie.info_url.as_ref().unwrap().as_str(),
            "http://www.imdb.com/title/tt1375666/"
        );
        assert!(movie.poster_url.is_some());
        assert_eq!(movie.movie_type, MovieType::Movie);
        assert_eq!(movie.genres, vec!["Action", "Adventure", "Sci-Fi"]);
        assert_eq!(movie.languages, vec!["English", "Japanese", "French"]);
        assert_eq!(movie.countries, vec!["USA", "UK"]);
        assert_eq!(movie.actors.len(), 2);
        assert_eq!(movie.runtimes_minutes, vec![148]);
        assert_eq!(movie.aka_titles.len(), 2);
        assert_eq!(movie.aka_titles[1].country, "Argentina");
        assert_eq!(movie.aka_titles[1].title, "El origen");
        assert_eq!(movie.release_dates.len(), 2);
        assert_eq!(movie.release_dates[0].date, date(2010, 7, 8));
        assert_eq!(movie.year(), 2010);
    }

    #[test]
    fn test_empty_payload_uses_defaults() {
        let parsed = parse(json!({}));
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.movie, Movie::default());
    }

    #[test]
    fn test_plot_falls_back_to_plot_simple() {
        let parsed = parse(json!({"plot_simple": "A hero rises."}));
        assert_eq!(parsed.movie.plot.as_deref(), Some("A hero rises."));
    }

    #[test]
    fn test_null_plot_falls_back_to_plot_simple() {
        let parsed = parse(json!({"plot": null, "plot_simple": "A hero rises."}));
        assert_eq!(parsed.movie.plot.as_deref(), Some("A hero rises."));
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn test_full_plot_preferred() {
        let parsed = parse(json!({"plot": "Long plot.", "plot_simple": "Short."}));
        assert_eq!(parsed.movie.plot.as_deref(), Some("Long plot."));
    }

    #[test]
    fn test_bad_runtime_is_skipped() {
        let parsed = parse(json!({"runtime": ["120 min", "bogus", "90 min"]}));
        assert_eq!(parsed.movie.runtimes_minutes, vec![120, 90]);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].field, "runtime");
    }

    #[test]
    fn test_aka_bare_strings_keep_first_only() {
        let parsed = parse(json!({"also_known_as": ["Alt Title", "Other Title"]}));
        assert_eq!(
            parsed.movie.aka_titles,
            vec![AkaTitle {
                country: "USA".to_string(),
                title: "Alt Title".to_string(),
            }]
        );
    }

    #[test]
    fn test_aka_single_string() {
        let parsed = parse(json!({"also_known_as": "Alt Title"}));
        assert_eq!(parsed.movie.aka_titles.len(), 1);
        assert_eq!(parsed.movie.aka_titles[0].title, "Alt Title");
    }

    #[test]
    fn test_aka_unrecognized_shape() {
        let parsed = parse(json!({"also_known_as": [{"name": "x"}], "title": "Kept"}));
        assert!(parsed.movie.aka_titles.is_empty());
        assert_eq!(parsed.movie.title.as_deref(), Some("Kept"));
        assert_eq!(parsed.warnings[0].field, "also_known_as");
    }

    #[test]
    fn test_release_date_single_string() {
        let parsed = parse(json!({"release_date": "20010615"}));
        assert_eq!(
            parsed.movie.release_dates,
            vec![ReleaseDate {
                country: "USA".to_string(),
                date: date(2001, 6, 15),
            }]
        );
        assert_eq!(parsed.movie.year(), 2001);
    }

    #[test]
    fn test_release_date_numeric_and_string_parts() {
        let parsed = parse(json!({
            "release_date": [{"country": "France", "year": "1999", "month": 3, "day": "31"}]
        }));
        assert_eq!(parsed.movie.release_dates[0].date, date(1999, 3, 31));
        assert_eq!(parsed.movie.year_for_country("France"), 1999);
        assert_eq!(parsed.movie.year(), 1900);
    }

    #[test]
    fn test_release_date_unparsable() {
        let parsed = parse(json!({"release_date": "June 2001", "title": "Kept"}));
        assert!(parsed.movie.release_dates.is_empty());
        assert_eq!(parsed.movie.title.as_deref(), Some("Kept"));
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].field, "release_date");
    }

    #[test]
    fn test_release_date_bad_entry_keeps_valid_ones() {
        let parsed = parse(json!({
            "release_date": [
                {"country": "USA", "year": 1999, "month": 3, "day": 31},
                {"country": "France", "year": 1999},
                {"country": "UK", "year": 1999, "month": 2, "day": 30},
                {"country": "Japan", "year": 1999, "month": 9, "day": 11}
            ]
        }));
        let countries: Vec<_> = parsed
            .movie
            .release_dates
            .iter()
            .map(|r| r.country.as_str())
            .collect();
        assert_eq!(countries, vec!["USA", "Japan"]);
        assert_eq!(parsed.movie.year(), 1999);
        assert_eq!(parsed.movie.year_for_country("France"), 1900);
        assert_eq!(parsed.warnings.len(), 2);
        assert!(parsed.warnings.iter().all(|w| w.field == "release_date"));
    }

    #[test]
    fn test_release_date_invalid_calendar_entry() {
        let parsed = parse(json!({
            "release_date": [{"country": "USA", "year": 2001, "month": 2, "day": 30}]
        }));
        assert!(parsed.movie.release_dates.is_empty());
        assert_eq!(parsed.warnings[0].field, "release_date");
    }

    #[test]
    fn test_malformed_urls_are_dropped() {
        let parsed = parse(json!({
            "poster": "not a url",
            "imdb_url": "http://www.imdb.com/title/tt0000001/"
        }));
        assert!(parsed.movie.poster_url.is_none());
        assert!(parsed.movie.info_url.is_some());
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].field, "poster");
    }

    #[test]
    fn test_wrong_types_do_not_abort() {
        let parsed = parse(json!({
            "genres": "Drama",
            "rating": "n/a",
            "rating_count": "12",
            "type": "TVS",
            "writers": ["A", {"name": "B"}, "C"]
        }));
        let movie = parsed.movie;
        assert!(movie.genres.is_empty());
        assert_eq!(movie.rating, 0.0);
        assert_eq!(movie.vote_count, Some(12));
        assert_eq!(movie.movie_type, MovieType::TvSeries);
        assert_eq!(movie.writers, vec!["A", "C"]);

        let fields: Vec<_> = parsed.warnings.iter().map(|w| w.field).collect();
        assert_eq!(fields, vec!["rating", "genres", "writers"]);
    }

    #[test]
    fn test_unknown_type_code() {
        let parsed = parse(json!({"type": "Documentary"}));
        assert_eq!(parsed.movie.movie_type, MovieType::None);
    }
}

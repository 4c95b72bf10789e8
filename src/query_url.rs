//! Query URL construction
//!
//! Fields are joined with `&` in a fixed order. Values are inserted as
//! given; only characters that can never appear in a URL are
//! percent-encoded by the URL parser.

use crate::parameters::{SearchByIdParameters, SearchByTitleParameters, SharedOptions};
use thiserror::Error;
use url::Url;

/// Default endpoint of the movie metadata service.
pub const DEFAULT_BASE_URL: &str = "http://imdbapi.org/?";

/// Errors that can occur while building a query URL.
#[derive(Debug, Error)]
pub enum QueryUrlError {
    /// The assembled string is not a valid URL
    #[error("Malformed query URL {url}: {source}")]
    Malformed {
        url: String,
        source: url::ParseError,
    },
}

/// Forms a `key=value` pair.
fn pair(key: &str, value: impl AsRef<str>) -> String {
    format!("{}={}", key, value.as_ref())
}

/// Appends the verbosity and episode fields shared by every search.
fn push_shared(fields: &mut Vec<String>, options: &SharedOptions) {
    fields.push(pair("plot", options.plot.value()));
    fields.push(pair(
        "episode",
        if options.include_episodes { "1" } else { "0" },
    ));
    fields.push(pair("aka", options.aka.value()));
    fields.push(pair("release", options.release.value()));
}

fn finish(base_url: &str, fields: Vec<String>) -> Result<Url, QueryUrlError> {
    let raw = format!("{}{}", base_url, fields.join("&"));
    Url::parse(&raw).map_err(|source| QueryUrlError::Malformed { url: raw, source })
}

/// Builds the URL that looks up a movie by identifier.
///
/// # Arguments
///
/// * `base_url` - Service endpoint, ending where the query string begins
/// * `params` - The search parameters
///
/// # Errors
///
/// Returns [`QueryUrlError::Malformed`] if the result is not a valid URL.
pub fn search_by_id_url(
    base_url: &str,
    params: &SearchByIdParameters,
) -> Result<Url, QueryUrlError> {
    let mut fields = vec![pair("id", params.movie_id())];
    push_shared(&mut fields, &params.options);
    finish(base_url, fields)
}

/// Builds the URL that searches movies by title.
///
/// The `yg`/`year` pair is only present when a year filter is set, and is
/// placed between the shared fields and the type/paging fields.
///
/// # Errors
///
/// Returns [`QueryUrlError::Malformed`] if the result is not a valid URL.
pub fn search_by_title_url(
    base_url: &str,
    params: &SearchByTitleParameters,
) -> Result<Url, QueryUrlError> {
    let mut fields = vec![pair("title", params.title())];
    push_shared(&mut fields, &params.options);

    if let Some(year) = params.year_filter() {
        fields.push(pair("yg", "1"));
        fields.push(pair("year", year.to_string()));
    }

    fields.push(pair("mt", params.movie_type_filter().code()));
    fields.push(pair("offset", params.offset_value().to_string()));
    fields.push(pair("limit", params.limit_value().to_string()));

    finish(base_url, fields)
}

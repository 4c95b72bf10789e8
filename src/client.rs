//! Movie metadata client
//!
//! Ties the query builder, the transport and the response parsers together.
//! Two levels of API are offered: envelope-level calls that never fail and
//! carry the status, and movie-level calls that return typed results or a
//! [`ResponseError`].

use crate::movie::Movie;
use crate::parameters::{SearchByIdParameters, SearchByTitleParameters};
use crate::query_url::{self, DEFAULT_BASE_URL, QueryUrlError};
use crate::response::{ResponseArray, ResponseObject};
use crate::status::ResponseStatus;
use crate::transport::{HttpTransport, Transport, TransportError};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 20_000;

/// Fixed page size used when collecting every result of a title search.
pub const FULL_SEARCH_PAGE_SIZE: u32 = 5;

/// Failure of a search call, carrying the status reported for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Response error: {status}")]
pub struct ResponseError {
    status: ResponseStatus,
}

impl ResponseError {
    /// The status that caused the failure.
    pub fn status(&self) -> ResponseStatus {
        self.status
    }
}

impl From<ResponseStatus> for ResponseError {
    fn from(status: ResponseStatus) -> Self {
        Self { status }
    }
}

/// Progress event emitted while collecting all pages of a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// A page was fetched and parsed successfully
    PageFetched {
        /// Offset of the page
        offset: u32,
        /// Number of elements on the page
        count: usize,
        /// Total number of matches reported by the first page
        total: u64,
    },
}

/// Per-client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service endpoint, ending where the query string begins
    pub base_url: String,
    /// Request timeout, zero disables it
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Sets the timeout in milliseconds; negative values are clamped to 0.
    #[must_use]
    pub fn with_timeout_millis(mut self, millis: i64) -> Self {
        self.timeout = Duration::from_millis(millis.max(0).unsigned_abs());
        self
    }

    /// Sets the service endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Client for the movie metadata service.
///
/// The transport is pluggable; [`HttpTransport`] is used by default.
///
/// # Examples
///
/// ```no_run
/// use imdbapi_client::{ImdbClient, SearchByIdParameters};
///
/// let client = ImdbClient::new().unwrap();
/// let movie = client.search_by_id(&SearchByIdParameters::new("tt1375666")).unwrap();
/// println!("{:?} ({})", movie.title, movie.year());
/// ```
#[derive(Debug)]
pub struct ImdbClient<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl ImdbClient<HttpTransport> {
    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates an HTTP client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> ImdbClient<T> {
    /// Creates a client that fetches through the given transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// The configuration this client was created with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The transport requests are sent through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Looks up a movie by identifier, returning the raw envelope.
    pub fn search_movie_by_id(&self, params: &SearchByIdParameters) -> ResponseObject {
        match query_url::search_by_id_url(&self.config.base_url, params) {
            Ok(url) => ResponseObject::parse(&self.transport.fetch(&url)),
            Err(e) => {
                log_malformed(&e);
                ResponseObject::from_status(ResponseStatus::MalformedUrl)
            }
        }
    }

    /// Fetches one page of a title search, returning the raw envelope.
    pub fn search_movie_by_title(&self, params: &SearchByTitleParameters) -> ResponseArray {
        match query_url::search_by_title_url(&self.config.base_url, params) {
            Ok(url) => ResponseArray::parse(&self.transport.fetch(&url)),
            Err(e) => {
                log_malformed(&e);
                ResponseArray::from_status(ResponseStatus::MalformedUrl)
            }
        }
    }

    /// Fetches every page of a title search into one envelope.
    ///
    /// Caller supplied offset and limit are ignored: pages of
    /// [`FULL_SEARCH_PAGE_SIZE`] are requested from offset 0 until the
    /// total reported by the first page is reached. A failing page fails
    /// the whole search and discards what was collected so far.
    pub fn full_search_movie_by_title(&self, params: &SearchByTitleParameters) -> ResponseArray {
        self.full_search_movie_by_title_with_progress(params, |_| {})
    }

    /// Like [`ImdbClient::full_search_movie_by_title`], reporting each page.
    pub fn full_search_movie_by_title_with_progress<F>(
        &self,
        params: &SearchByTitleParameters,
        mut progress_callback: F,
    ) -> ResponseArray
    where
        F: FnMut(SearchEvent),
    {
        let mut result = self.search_movie_by_title(&params.page(0, FULL_SEARCH_PAGE_SIZE));
        if result.has_error() {
            return result;
        }

        let total = result.total();
        progress_callback(SearchEvent::PageFetched {
            offset: 0,
            count: result.data().map_or(0, <[Value]>::len),
            total,
        });

        let mut offset = FULL_SEARCH_PAGE_SIZE;
        while u64::from(offset) < total {
            let page = self.search_movie_by_title(&params.page(offset, FULL_SEARCH_PAGE_SIZE));

            let items = match page.into_result() {
                Ok(items) => items,
                Err(status) => {
                    tracing::warn!(offset, %status, "Page fetch failed, aborting full search");
                    return ResponseArray::from_status(status);
                }
            };

            progress_callback(SearchEvent::PageFetched {
                offset,
                count: items.len(),
                total,
            });
            result.extend(items);

            offset = match offset.checked_add(FULL_SEARCH_PAGE_SIZE) {
                Some(next) => next,
                None => break,
            };
        }

        result
    }

    /// Looks up a single movie by identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`ResponseError`] carrying the status of a failed call.
    pub fn search_by_id(&self, params: &SearchByIdParameters) -> Result<Movie, ResponseError> {
        let json = self.search_movie_by_id(params).into_result()?;
        Ok(Movie::from_json(&json))
    }

    /// Fetches one page of movies matching a title.
    ///
    /// # Errors
    ///
    /// Returns a [`ResponseError`] carrying the status of a failed call.
    pub fn search_by_title(
        &self,
        params: &SearchByTitleParameters,
    ) -> Result<Vec<Movie>, ResponseError> {
        let items = self.search_movie_by_title(params).into_result()?;
        Ok(movies_from_items(items))
    }

    /// Fetches every movie matching a title, see
    /// [`ImdbClient::full_search_movie_by_title`].
    ///
    /// # Errors
    ///
    /// Returns a [`ResponseError`] if any page fails.
    pub fn full_search_by_title(
        &self,
        params: &SearchByTitleParameters,
    ) -> Result<Vec<Movie>, ResponseError> {
        self.full_search_by_title_with_progress(params, |_| {})
    }

    /// Like [`ImdbClient::full_search_by_title`], reporting each page.
    ///
    /// # Errors
    ///
    /// Returns a [`ResponseError`] if any page fails.
    pub fn full_search_by_title_with_progress<F>(
        &self,
        params: &SearchByTitleParameters,
        progress_callback: F,
    ) -> Result<Vec<Movie>, ResponseError>
    where
        F: FnMut(SearchEvent),
    {
        let items = self
            .full_search_movie_by_title_with_progress(params, progress_callback)
            .into_result()?;
        Ok(movies_from_items(items))
    }
}

fn log_malformed(error: &QueryUrlError) {
    tracing::warn!(error = %error, "Could not build query URL");
}

/// Parses every object element into a movie; other elements are skipped.
fn movies_from_items(items: Vec<Value>) -> Vec<Movie> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(json) => Some(Movie::from_json(&json)),
            other => {
                tracing::warn!(element = %other, "Skipping non-object search result");
                None
            }
        })
        .collect()
}

//! imdbapi_client - Blocking client for the imdbapi.org movie metadata service
//!
//! This library builds query URLs from typed parameters, fetches them through a
//! pluggable transport, and turns the loosely shaped JSON responses into
//! [`Movie`] records. Service and transport failures surface as a
//! [`ResponseError`] carrying one [`ResponseStatus`].
//!
//! # Examples
//!
//! ```
//! use imdbapi_client::{
//!     CannedTransport, ClientConfig, ImdbClient, ResponseStatus, SearchByIdParameters,
//! };
//!
//! let transport = CannedTransport::new().fallback(r#"{"code":404}"#);
//! let client = ImdbClient::with_transport(ClientConfig::default(), transport);
//!
//! let err = client.search_by_id(&SearchByIdParameters::new("tt0000000")).unwrap_err();
//! assert_eq!(err.status(), ResponseStatus::MovieNotFound);
//! ```

mod client;
mod movie;
mod parameters;
mod query_url;
mod response;
mod status;
mod transport;

pub use client::{
    ClientConfig, DEFAULT_TIMEOUT_MS, FULL_SEARCH_PAGE_SIZE, ImdbClient, ResponseError,
    SearchEvent,
};
pub use movie::{
    AkaTitle, DEFAULT_COUNTRY, FieldWarning, Movie, MovieType, ParsedMovie, ReleaseDate,
    UNKNOWN_YEAR, parse_movie,
};
pub use parameters::{SearchByIdParameters, SearchByTitleParameters, SharedOptions, Verbosity};
pub use query_url::{DEFAULT_BASE_URL, QueryUrlError, search_by_id_url, search_by_title_url};
pub use response::{ResponseArray, ResponseObject};
pub use status::ResponseStatus;
pub use transport::{CannedTransport, HttpTransport, Transport, TransportError, status_payload};

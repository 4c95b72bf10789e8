//! HTTP transport
//!
//! A transport turns a query URL into response text. Failures never leave
//! this layer as errors: a timeout becomes `{"code":99}` and every other
//! failure `{"code":100}`, so callers only ever deal with status codes.

use crate::status::ResponseStatus;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("imdbapi_client/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while setting up a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying HTTP client could not be created
    #[error("Failed to build HTTP client: {0}")]
    ClientBuildFailed(#[source] reqwest::Error),
}

/// Trait for anything that can fetch the raw text behind a query URL.
///
/// Implementations must not fail: transport problems are reported as a
/// minimal status payload (see [`status_payload`]).
pub trait Transport {
    /// Performs a GET request and returns the response body.
    fn fetch(&self, url: &Url) -> String;
}

/// Encodes a status as the minimal JSON payload understood by the
/// response parser.
pub fn status_payload(status: ResponseStatus) -> String {
    serde_json::json!({ "code": status.code() }).to_string()
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Creates a transport with the given request timeout.
    ///
    /// A zero timeout disables the limit entirely.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuildFailed`] if the TLS backend or
    /// client configuration cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let timeout = (!timeout.is_zero()).then_some(timeout);

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(TransportError::ClientBuildFailed)?;

        Ok(Self { client })
    }

    fn try_fetch(&self, url: &Url) -> Result<String, reqwest::Error> {
        let response = self.client.get(url.clone()).send()?.error_for_status()?;
        response.text()
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &Url) -> String {
        tracing::debug!(%url, "imdbapi request");

        match self.try_fetch(url) {
            Ok(body) => {
                tracing::trace!(%url, body_len = body.len(), "Response body received");
                body
            }
            Err(e) if e.is_timeout() => {
                tracing::warn!(%url, error = %e, "Request timed out");
                status_payload(ResponseStatus::Timeout)
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "Request failed");
                status_payload(ResponseStatus::UnknownError)
            }
        }
    }
}

/// Offline transport that serves canned bodies per URL.
///
/// Every requested URL is recorded so callers can verify which pages were
/// fetched. URLs without a canned body get the fallback body, or an
/// unknown-error payload when no fallback is set.
#[derive(Debug, Default)]
pub struct CannedTransport {
    bodies: HashMap<String, String>,
    fallback: Option<String>,
    requested: RefCell<Vec<String>>,
}

impl CannedTransport {
    /// Creates a transport with no canned bodies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for requests to exactly `url`.
    #[must_use]
    pub fn respond(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// Serves `body` for every URL without a specific response.
    #[must_use]
    pub fn fallback(mut self, body: impl Into<String>) -> Self {
        self.fallback = Some(body.into());
        self
    }

    /// URLs requested so far, in request order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl Transport for CannedTransport {
    fn fetch(&self, url: &Url) -> String {
        self.requested.borrow_mut().push(url.to_string());

        self.bodies
            .get(url.as_str())
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or_else(|| status_payload(ResponseStatus::UnknownError))
    }
}
